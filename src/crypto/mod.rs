//! Key generation and address derivation.
//!
//! This module provides:
//! - The `KeyGenerator` seam used by the search workers
//! - A secp256k1 / Keccak-256 implementation backed by the OS entropy source
//! - EIP-55 checksummed address encoding

mod address;
mod generator;
mod keypair;

pub use address::{Address, ADDRESS_HEX_LEN};
pub use generator::{Candidate, KeyGenError, KeyGenerator, Secp256k1Generator};
pub use keypair::Keypair;
