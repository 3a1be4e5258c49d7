//! End-to-end search runs with simulated and real key generators.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rand::Rng;

use evm_vanity::{
    Candidate, Eta, KeyGenError, KeyGenerator, MatchCriteria, Reporter, SearchError,
    Secp256k1Generator, WorkerPool,
};

const MISS: &str = "0x0000000000000000000000000000000000000000";

/// Collects everything a run reports.
#[derive(Default)]
struct Collector {
    matches: Vec<Candidate>,
    etas: Vec<Eta>,
}

impl Reporter for Collector {
    fn on_match(&mut self, candidate: &Candidate) {
        self.matches.push(candidate.clone());
    }

    fn on_eta(&mut self, eta: Eta) {
        self.etas.push(eta);
    }
}

/// Matches `ab` with probability `1 / one_in`, every candidate unique.
struct Probabilistic {
    one_in: u32,
    calls: AtomicUsize,
}

impl KeyGenerator for Probabilistic {
    fn generate(&self) -> Result<Candidate, KeyGenError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed) as u64;
        let mut secret = [0u8; 32];
        secret[..8].copy_from_slice(&n.to_be_bytes());

        let address = if rand::thread_rng().gen_ratio(1, self.one_in) {
            format!("0xab{:038x}", n)
        } else {
            format!("0xcd{:038x}", n)
        };
        Ok(Candidate::new(secret, address))
    }
}

/// Replays a fixed list of addresses, then misses forever.
struct Scripted {
    addresses: Mutex<VecDeque<&'static str>>,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(addresses: &[&'static str]) -> Self {
        Self {
            addresses: Mutex::new(addresses.iter().copied().collect()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl KeyGenerator for Scripted {
    fn generate(&self) -> Result<Candidate, KeyGenError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let address = self.addresses.lock().unwrap().pop_front().unwrap_or(MISS);
        Ok(Candidate::new([n as u8; 32], address))
    }
}

/// Fails after a number of successful misses.
struct Failing {
    after: usize,
    calls: AtomicUsize,
}

impl KeyGenerator for Failing {
    fn generate(&self) -> Result<Candidate, KeyGenError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.after {
            return Err(rand::Error::new("entropy source exhausted").into());
        }
        Ok(Candidate::new([1u8; 32], MISS))
    }
}

#[test]
fn test_exactly_target_matches_under_contention() {
    let criteria = MatchCriteria::new("AB", "").unwrap();

    for _ in 0..25 {
        let generator = Arc::new(Probabilistic {
            one_in: 4,
            calls: AtomicUsize::new(0),
        });
        let pool = WorkerPool::new(8, generator.clone());

        let summary = pool.run(&criteria, 5, Collector::default()).unwrap();

        assert_eq!(summary.matches, 5);
        assert_eq!(summary.reporter.matches.len(), 5);
        let distinct: HashSet<_> = summary
            .reporter
            .matches
            .iter()
            .map(|c| c.secret_key)
            .collect();
        assert_eq!(distinct.len(), 5);
        assert!(summary
            .reporter
            .matches
            .iter()
            .all(|c| criteria.matches(&c.address).is_match()));
        assert_eq!(
            summary.total_attempts,
            generator.calls.load(Ordering::Relaxed) as u64
        );
    }
}

#[test]
fn test_empty_criteria_single_attempt() {
    let generator = Arc::new(Scripted::new(&[]));
    let pool = WorkerPool::new(1, generator.clone());

    let summary = pool
        .run(&MatchCriteria::default(), 1, Collector::default())
        .unwrap();

    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(summary.total_attempts, 1);
    assert_eq!(summary.reporter.matches.len(), 1);
    assert_eq!(summary.reporter.matches[0].address, MISS);
}

#[test]
fn test_prefix_scenario_reports_second_address_only() {
    let hit = "0xdeadbeef0000000000000000000000000000ffff";
    let generator = Arc::new(Scripted::new(&[
        "0x1234000000000000000000000000000000000000",
        hit,
    ]));
    let pool = WorkerPool::new(1, generator.clone());
    let criteria = MatchCriteria::new("dead", "").unwrap();

    let summary = pool.run(&criteria, 1, Collector::default()).unwrap();

    let reported: Vec<_> = summary
        .reporter
        .matches
        .iter()
        .map(|c| c.address.as_str())
        .collect();
    assert_eq!(reported, vec![hit]);
    assert_eq!(summary.reporter.matches[0].secret_key, [1u8; 32]);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_generator_failure_aborts_run() {
    let generator = Arc::new(Failing {
        after: 100,
        calls: AtomicUsize::new(0),
    });
    let pool = WorkerPool::new(4, generator);

    let result = pool.run(&MatchCriteria::new("ff", "").unwrap(), 1, Collector::default());

    assert!(matches!(result, Err(SearchError::KeyGeneration(_))));
}

#[test]
fn test_real_generator_finds_prefix() {
    let pool = WorkerPool::with_available_parallelism(Arc::new(Secp256k1Generator::new()));
    let criteria = MatchCriteria::new("A", "").unwrap();

    let summary = pool.run(&criteria, 2, Collector::default()).unwrap();

    assert_eq!(summary.reporter.matches.len(), 2);
    for candidate in &summary.reporter.matches {
        assert_eq!(candidate.address.len(), 42);
        assert!(candidate.address[2..].to_lowercase().starts_with('a'));
        assert_eq!(candidate.private_key_hex().len(), 66);
    }
}
