//! CPU-based worker for vanity address generation.

use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{debug, error};

use crate::crypto::{Candidate, KeyGenError, KeyGenerator};
use crate::matcher::MatchCriteria;

use super::SearchState;

/// A CPU worker that generates and tests candidates.
pub struct CpuWorker<G: ?Sized> {
    /// Worker ID
    id: usize,
    /// The criteria to match against
    criteria: MatchCriteria,
    /// Source of candidates
    generator: Arc<G>,
    /// Rendezvous channel to the result sink
    result_tx: Sender<Candidate>,
    /// Shared run state
    state: Arc<SearchState>,
}

impl<G: KeyGenerator + ?Sized> CpuWorker<G> {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        criteria: MatchCriteria,
        generator: Arc<G>,
        result_tx: Sender<Candidate>,
        state: Arc<SearchState>,
    ) -> Self {
        Self {
            id,
            criteria,
            generator,
            result_tx,
            state,
        }
    }

    /// Runs the worker loop.
    ///
    /// Generates candidates and tests them until no match is outstanding. Each
    /// match is delivered only after a slot was claimed from the shared state;
    /// a match found after the target was reached is dropped. Returns the
    /// number of matches this worker delivered.
    pub fn run(&self) -> Result<usize, KeyGenError> {
        debug!("worker {} started", self.id);
        let mut delivered = 0;

        while !self.state.is_finished() {
            let candidate = match self.generator.generate() {
                Ok(candidate) => candidate,
                Err(e) => {
                    error!("worker {}: key generation failed: {}", self.id, e);
                    self.state.abort();
                    return Err(e);
                }
            };
            self.state.record_attempt();

            if !self.criteria.matches(&candidate.address).is_match() {
                continue;
            }

            if !self.state.claim_match() {
                debug!("worker {}: target already reached, dropping {}", self.id, candidate.address);
                break;
            }

            debug!("worker {} found {}", self.id, candidate.address);
            // The sink only disconnects once every sender is gone.
            if self.result_tx.send(candidate).is_err() {
                break;
            }
            delivered += 1;
        }

        debug!("worker {} finished after delivering {} match(es)", self.id, delivered);
        Ok(delivered)
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }
}
