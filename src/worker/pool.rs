//! Worker pool management.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use log::{error, info};

use crate::crypto::{Candidate, KeyGenError, KeyGenerator};
use crate::matcher::MatchCriteria;
use crate::progress::{ProgressEstimator, Reporter};

use super::cpu::CpuWorker;
use super::SearchState;

/// Default interval between two ETA reports.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Target count must be at least 1")]
    InvalidCount,
    #[error("Worker count must be at least 1")]
    NoWorkers,
    #[error("Key generation failed: {0}")]
    KeyGeneration(#[from] KeyGenError),
    #[error("Failed to spawn thread: {0}")]
    Spawn(#[from] io::Error),
    #[error("A search thread panicked")]
    WorkerPanicked,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct SearchSummary<R> {
    /// The reporter, handed back after the last match
    pub reporter: R,
    /// Matches delivered to the reporter
    pub matches: usize,
    /// Generation attempts across all workers
    pub total_attempts: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl<R> SearchSummary<R> {
    /// Returns the average generation rate (keys per second).
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed.as_secs_f64();
        if elapsed > 0.0 {
            self.total_attempts as f64 / elapsed
        } else {
            0.0
        }
    }
}

/// Runs a search on a fixed pool of CPU workers.
///
/// Each call to [`WorkerPool::run`] gets its own [`SearchState`], so a pool can
/// be reused for several searches.
pub struct WorkerPool<G: ?Sized> {
    /// Number of workers
    num_workers: usize,
    /// Candidate source shared by all workers
    generator: Arc<G>,
    /// Interval between ETA reports
    report_interval: Duration,
}

impl<G: KeyGenerator + ?Sized + 'static> WorkerPool<G> {
    /// Creates a pool with the specified number of workers.
    pub fn new(num_workers: usize, generator: Arc<G>) -> Self {
        Self {
            num_workers,
            generator,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }

    /// Creates a pool with one worker per available CPU.
    pub fn with_available_parallelism(generator: Arc<G>) -> Self {
        Self::new(num_cpus::get(), generator)
    }

    /// Sets the interval between ETA reports.
    pub fn report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Searches until exactly `target_count` matches were handed to `reporter`.
    ///
    /// Blocks until every worker and the progress thread have exited. A key
    /// generation failure in any worker stops all of them and is returned.
    pub fn run<R: Reporter + 'static>(
        &self,
        criteria: &MatchCriteria,
        target_count: usize,
        reporter: R,
    ) -> Result<SearchSummary<R>, SearchError> {
        if target_count == 0 {
            return Err(SearchError::InvalidCount);
        }
        if self.num_workers == 0 {
            return Err(SearchError::NoWorkers);
        }

        let start_time = Instant::now();
        let state = Arc::new(SearchState::new(target_count));
        let (result_tx, result_rx) = bounded(0);

        info!(
            "Searching for {} match(es) with {} worker(s)",
            target_count, self.num_workers
        );

        let estimator = ProgressEstimator::new(
            criteria.clone(),
            state.clone(),
            result_rx,
            self.report_interval,
            reporter,
        );
        let estimator_handle = thread::Builder::new()
            .name("vanity-progress".into())
            .spawn(move || estimator.run())?;

        let spawned = self.spawn_workers(criteria, &state, result_tx);
        let worker_results: Vec<_> = match spawned {
            Ok(handles) => handles.into_iter().map(JoinHandle::join).collect(),
            Err(e) => {
                error!("Aborting search: {}", e);
                // Workers already running were joined inside spawn_workers.
                let _ = estimator_handle.join();
                return Err(e.into());
            }
        };

        let (reporter, matches) = estimator_handle
            .join()
            .map_err(|_| SearchError::WorkerPanicked)?;

        let mut delivered = 0;
        for result in worker_results {
            delivered += result.map_err(|_| SearchError::WorkerPanicked)??;
        }
        debug_assert_eq!(delivered, matches);

        let summary = SearchSummary {
            reporter,
            matches,
            total_attempts: state.total_attempts(),
            elapsed: start_time.elapsed(),
        };
        info!(
            "Search finished: {} match(es) in {} attempts ({:.2}s)",
            summary.matches,
            summary.total_attempts,
            summary.elapsed.as_secs_f64()
        );
        Ok(summary)
    }

    /// Spawns worker threads.
    ///
    /// If a spawn fails the run is aborted and the workers started so far are
    /// joined before the error is returned.
    fn spawn_workers(
        &self,
        criteria: &MatchCriteria,
        state: &Arc<SearchState>,
        result_tx: Sender<Candidate>,
    ) -> io::Result<Vec<JoinHandle<Result<usize, KeyGenError>>>> {
        let mut handles = Vec::with_capacity(self.num_workers);

        for id in 0..self.num_workers {
            let worker = CpuWorker::new(
                id,
                criteria.clone(),
                self.generator.clone(),
                result_tx.clone(),
                state.clone(),
            );

            let spawned = thread::Builder::new()
                .name(format!("vanity-worker-{}", id))
                .spawn(move || worker.run());

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    state.abort();
                    drop(result_tx);
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(e);
                }
            }
        }

        Ok(handles)
    }
}
