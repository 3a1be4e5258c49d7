//! Address matching.
//!
//! A candidate matches when its hex digits start with the requested prefix and
//! end with the requested suffix, ignoring case.

mod pattern;

pub use pattern::{CriteriaError, MatchCriteria, MatchResult};
