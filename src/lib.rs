//! # evm_vanity
//!
//! Multi-threaded EVM vanity address generator.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation and address derivation
//! - `matcher`: Prefix/suffix criteria
//! - `worker`: Parallel search, shared state and coordination
//! - `progress`: ETA estimation and match reporting
//! - `config`: Command-line configuration

pub mod config;
pub mod crypto;
pub mod matcher;
pub mod progress;
pub mod worker;

pub use config::{Config, ConfigError};
pub use crypto::{Address, Candidate, KeyGenError, KeyGenerator, Keypair, Secp256k1Generator};
pub use matcher::{CriteriaError, MatchCriteria, MatchResult};
pub use progress::{ConsoleReporter, Eta, ProgressEstimator, Reporter};
pub use worker::{SearchError, SearchState, SearchSummary, WorkerPool};
