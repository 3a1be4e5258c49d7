//! Prefix/suffix criteria and the address predicate.

use crate::crypto::ADDRESS_HEX_LEN;

/// Length of the `0x` marker preceding the hex digits of an address.
const MARKER_LEN: usize = 2;

/// Result of a pattern match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Full match found
    Match,
    /// No match
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }
}

impl From<bool> for MatchResult {
    fn from(matched: bool) -> Self {
        if matched {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("{field} must contain only hex characters (0-9, a-f), got {value:?}")]
    NotHex { field: &'static str, value: String },
    #[error("Combined prefix + suffix length {0} exceeds the 40 hex digits of an address")]
    TooLong(usize),
}

/// What a derived address has to look like.
///
/// Both parts are compared case-insensitively; an empty part always matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchCriteria {
    prefix: String,
    suffix: String,
}

impl MatchCriteria {
    /// Validates and builds criteria.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Result<Self, CriteriaError> {
        let prefix = prefix.into();
        let suffix = suffix.into();

        check_hex("prefix", &prefix)?;
        check_hex("suffix", &suffix)?;

        let total = prefix.len() + suffix.len();
        if total > ADDRESS_HEX_LEN {
            return Err(CriteriaError::TooLong(total));
        }

        Ok(Self { prefix, suffix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Number of address digits constrained by these criteria.
    pub fn matched_digits(&self) -> usize {
        self.prefix.len() + self.suffix.len()
    }

    /// Tests a `0x`-prefixed address string.
    ///
    /// Addresses too short to hold the requested digits never match.
    #[inline]
    pub fn matches(&self, address: &str) -> MatchResult {
        let prefix_ok = self.prefix.is_empty()
            || address
                .get(MARKER_LEN..MARKER_LEN + self.prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(&self.prefix));

        let suffix_ok = self.suffix.is_empty()
            || address
                .len()
                .checked_sub(self.suffix.len())
                .filter(|&start| start >= MARKER_LEN)
                .and_then(|start| address.get(start..))
                .is_some_and(|tail| tail.eq_ignore_ascii_case(&self.suffix));

        (prefix_ok && suffix_ok).into()
    }

    /// Expected number of uniformly random addresses drawn per match:
    /// `16^total / 16^(total - matched)`.
    pub fn expected_attempts(&self) -> f64 {
        let total = ADDRESS_HEX_LEN as i32;
        let remaining = total - self.matched_digits() as i32;
        16f64.powi(total) / 16f64.powi(remaining)
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> &'static str {
        match self.expected_attempts() {
            d if d <= 1_000.0 => "Very Easy (< 1 second)",
            d if d <= 100_000.0 => "Easy (seconds)",
            d if d <= 10_000_000.0 => "Medium (minutes)",
            d if d <= 1_000_000_000.0 => "Hard (hours)",
            _ => "Very Hard (days or more)",
        }
    }
}

fn check_hex(field: &'static str, value: &str) -> Result<(), CriteriaError> {
    if value.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(CriteriaError::NotHex {
            field,
            value: value.to_owned(),
        })
    }
}
