//! Worker pool for parallel vanity address generation.
//!
//! This module provides:
//! - Multi-threaded CPU workers
//! - Shared per-run counters with a guarded match claim
//! - The coordinator that spawns, joins and summarizes a run

mod cpu;
mod pool;
mod state;

pub use cpu::CpuWorker;
pub use pool::{SearchError, SearchSummary, WorkerPool, DEFAULT_REPORT_INTERVAL};
pub use state::SearchState;
