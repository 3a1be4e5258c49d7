//! Runtime configuration for the vanity address generator.

use std::time::Duration;

use clap::Parser;

use crate::matcher::{CriteriaError, MatchCriteria};

/// EVM Vanity Address Generator
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address prefix to match (hex characters only, case-insensitive)
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Address suffix to match (hex characters only, case-insensitive)
    #[arg(short, long, default_value = "")]
    pub suffix: String,

    /// Number of matching addresses to find
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// ETA report interval in seconds
    #[arg(short, long, default_value = "1")]
    pub report_interval: u64,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Returns the ETA report interval.
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval)
    }

    /// Validates the configuration and builds the match criteria.
    pub fn validate(&self) -> Result<MatchCriteria, ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidCount);
        }
        if self.worker_count() == 0 {
            return Err(ConfigError::InvalidWorkers);
        }
        if self.report_interval == 0 {
            return Err(ConfigError::InvalidInterval);
        }

        Ok(MatchCriteria::new(self.prefix.as_str(), self.suffix.as_str())?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] CriteriaError),
    #[error("--count must be at least 1")]
    InvalidCount,
    #[error("--workers must be at least 1")]
    InvalidWorkers,
    #[error("--report-interval must be at least 1 second")]
    InvalidInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config(prefix: &str, suffix: &str) -> Config {
        Config {
            prefix: prefix.into(),
            suffix: suffix.into(),
            count: 1,
            workers: None,
            report_interval: 1,
        }
    }

    #[test]
    fn test_valid_pattern() {
        let criteria = make_test_config("Dead", "BEEF").validate().unwrap();
        assert_eq!(criteria.prefix(), "Dead");
        assert_eq!(criteria.suffix(), "BEEF");
        assert_eq!(criteria.matched_digits(), 8);
    }

    #[test]
    fn test_empty_pattern_allowed() {
        assert!(make_test_config("", "").validate().is_ok());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            make_test_config("xyz", "").validate(),
            Err(ConfigError::InvalidPattern(CriteriaError::NotHex { .. }))
        ));
        assert!(matches!(
            make_test_config(&"a".repeat(30), &"b".repeat(11)).validate(),
            Err(ConfigError::InvalidPattern(CriteriaError::TooLong(41)))
        ));
    }

    #[test]
    fn test_invalid_numbers() {
        let mut config = make_test_config("a", "");
        config.count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCount)));

        let mut config = make_test_config("a", "");
        config.workers = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWorkers)));

        let mut config = make_test_config("a", "");
        config.report_interval = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidInterval)));
    }

    #[test]
    fn test_parse_args() {
        let config = Config::parse_from(["evm-vanity", "--prefix", "dead", "-s", "ff", "-n", "3", "-w", "2"]);
        assert_eq!(config.prefix, "dead");
        assert_eq!(config.suffix, "ff");
        assert_eq!(config.count, 3);
        assert_eq!(config.worker_count(), 2);
        assert_eq!(config.report_interval(), Duration::from_secs(1));
    }
}
