//! Counters shared by every worker of one search run.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Shared state of one run.
///
/// `outstanding` only ever moves down through [`SearchState::claim_match`],
/// which refuses to go below zero, so each successful claim corresponds to
/// exactly one delivered match.
#[derive(Debug)]
pub struct SearchState {
    /// Matches still needed
    outstanding: AtomicUsize,
    /// Generation attempts since the last accepted match
    attempts_since_match: AtomicU64,
    /// Generation attempts over the whole run
    total_attempts: AtomicU64,
    /// Set when a worker hit a fatal error
    aborted: AtomicBool,
}

impl SearchState {
    pub fn new(target_count: usize) -> Self {
        Self {
            outstanding: AtomicUsize::new(target_count),
            attempts_since_match: AtomicU64::new(0),
            total_attempts: AtomicU64::new(0),
            aborted: AtomicBool::new(false),
        }
    }

    /// Returns the number of matches still needed.
    #[inline]
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Returns true once workers should stop generating.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outstanding() == 0 || self.is_aborted()
    }

    /// Counts one generation attempt.
    #[inline]
    pub fn record_attempt(&self) {
        self.attempts_since_match.fetch_add(1, Ordering::Relaxed);
        self.total_attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// Tries to take one of the outstanding match slots.
    ///
    /// On success the attempt counter is reset and the caller owns the
    /// obligation to deliver its candidate. Returns false if the target was
    /// already reached; the caller must then drop its candidate.
    pub fn claim_match(&self) -> bool {
        let claimed = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok();

        if claimed {
            self.attempts_since_match.store(0, Ordering::Relaxed);
        }
        claimed
    }

    /// Returns the attempts made since the last accepted match.
    pub fn attempts_since_match(&self) -> u64 {
        self.attempts_since_match.load(Ordering::Relaxed)
    }

    /// Returns the attempts made over the whole run.
    pub fn total_attempts(&self) -> u64 {
        self.total_attempts.load(Ordering::Relaxed)
    }

    /// Stops every worker at its next check.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}
