//! ETA estimation and match hand-off to the display.
//!
//! The estimator runs on its own thread next to the worker pool. It wakes up on
//! a fixed interval to publish an ETA and, in between, receives matches from the
//! workers' rendezvous channel and forwards them to a [`Reporter`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{never, select, tick, Receiver};
use log::{debug, info};

use crate::crypto::Candidate;
use crate::matcher::MatchCriteria;
use crate::worker::SearchState;

/// Estimated time until the next match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eta {
    /// No attempts sampled since the last match
    Unknown,
    Remaining(Duration),
}

impl Eta {
    /// Computes the ETA from the sampled attempts since the last match.
    ///
    /// The sample is used directly as the rate; huge results saturate.
    pub fn estimate(criteria: &MatchCriteria, attempts_since_match: u64) -> Self {
        if attempts_since_match == 0 {
            return Eta::Unknown;
        }

        let seconds = (criteria.expected_attempts() / attempts_since_match as f64).trunc();
        Eta::Remaining(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Unknown => f.write_str("unknown"),
            Eta::Remaining(d) => f.write_str(&format_duration(*d)),
        }
    }
}

/// Formats a duration as `3d 4h 5m 6s`, omitting leading zero units.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, seconds) = (rem / 60, rem % 60);

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Receives search output for display.
pub trait Reporter: Send {
    /// Called once per delivered match, in delivery order.
    fn on_match(&mut self, candidate: &Candidate);

    /// Called on every progress tick while matches are outstanding.
    fn on_eta(&mut self, eta: Eta);
}

/// Prints matches to stdout and ETAs through the log.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    found: usize,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleReporter {
    fn on_match(&mut self, candidate: &Candidate) {
        self.found += 1;
        println!("=== Match #{} ===", self.found);
        println!("Address:     {}", candidate.address);
        println!("Private Key: {}", candidate.private_key_hex());
        println!();
    }

    fn on_eta(&mut self, eta: Eta) {
        info!("Approximate ETA for an account: {}", eta);
    }
}

/// Periodic ETA task and consumer end of the result rendezvous.
pub struct ProgressEstimator<R> {
    criteria: MatchCriteria,
    state: Arc<SearchState>,
    result_rx: Receiver<Candidate>,
    interval: Duration,
    reporter: R,
}

impl<R: Reporter> ProgressEstimator<R> {
    pub fn new(
        criteria: MatchCriteria,
        state: Arc<SearchState>,
        result_rx: Receiver<Candidate>,
        interval: Duration,
        reporter: R,
    ) -> Self {
        Self {
            criteria,
            state,
            result_rx,
            interval,
            reporter,
        }
    }

    /// Runs until every worker has dropped its sender.
    ///
    /// Ticking stops for good once no match is outstanding, but receiving goes
    /// on so that a worker which already claimed the last slot can always hand
    /// its candidate over. Returns the reporter and the number of matches
    /// forwarded.
    pub fn run(mut self) -> (R, usize) {
        let mut ticker = tick(self.interval);
        let mut forwarded = 0;

        loop {
            let mut finished = false;
            select! {
                recv(ticker) -> _ => {
                    if self.state.is_finished() {
                        finished = true;
                    } else {
                        let eta = Eta::estimate(&self.criteria, self.state.attempts_since_match());
                        self.reporter.on_eta(eta);
                    }
                }
                recv(self.result_rx) -> msg => match msg {
                    Ok(candidate) => {
                        self.reporter.on_match(&candidate);
                        forwarded += 1;
                    }
                    Err(_) => break,
                },
            }
            if finished {
                debug!("search finished, progress ticks stopped");
                ticker = never();
            }
        }

        (self.reporter, forwarded)
    }
}
