//! Candidate generation.

use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{All, Secp256k1};

use super::Keypair;

/// One generated key pair and its derived address string.
#[derive(Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The private key bytes
    pub secret_key: [u8; 32],
    /// `0x` followed by 40 hex digits
    pub address: String,
}

impl Candidate {
    /// Creates a candidate from its parts.
    pub fn new(secret_key: [u8; 32], address: impl Into<String>) -> Self {
        Self {
            secret_key,
            address: address.into(),
        }
    }

    /// Returns the exported private key (`0x`-prefixed lowercase hex).
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.secret_key))
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Failure of the randomness source backing key generation.
#[derive(Debug, thiserror::Error)]
pub enum KeyGenError {
    #[error("Entropy source failed: {0}")]
    Entropy(#[from] rand::Error),
}

/// Produces one fresh candidate per call.
///
/// Implementations are shared by every worker of a run.
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> Result<Candidate, KeyGenError>;
}

/// Generates secp256k1 keys from the OS entropy source.
pub struct Secp256k1Generator {
    secp: Secp256k1<All>,
}

impl Secp256k1Generator {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }
}

impl Default for Secp256k1Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for Secp256k1Generator {
    fn generate(&self) -> Result<Candidate, KeyGenError> {
        loop {
            let mut secret = [0u8; 32];
            OsRng.try_fill_bytes(&mut secret)?;

            // Out-of-range scalars are astronomically rare; draw again.
            if let Some(keypair) = Keypair::from_secret_bytes(&self.secp, secret) {
                return Ok(Candidate::new(secret, keypair.address().to_checksum()));
            }
        }
    }
}
