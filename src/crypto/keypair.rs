//! secp256k1 keypair handling and address derivation.

use secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use tiny_keccak::{Hasher, Keccak};

use super::Address;

/// A secp256k1 secret key together with its derived address.
#[derive(Debug, Clone)]
pub struct Keypair {
    /// The private key bytes (32 bytes)
    secret_key: [u8; 32],
    /// The derived address
    address: Address,
}

impl Keypair {
    /// Builds a keypair from raw secret bytes.
    ///
    /// Returns `None` if the bytes are not a valid scalar (zero or not below
    /// the curve order).
    pub fn from_secret_bytes(secp: &Secp256k1<All>, secret_bytes: [u8; 32]) -> Option<Self> {
        let secret_key = SecretKey::from_slice(&secret_bytes).ok()?;
        let public_key = PublicKey::from_secret_key(secp, &secret_key);

        Some(Self {
            secret_key: secret_bytes,
            address: derive_address(&public_key),
        })
    }

    /// Returns the private key bytes.
    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret_key
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

/// Derives an address from a secp256k1 public key.
///
/// Keccak-256 over the 64-byte uncompressed point (without the 0x04 tag),
/// keeping the last 20 bytes.
#[inline]
fn derive_address(public_key: &PublicKey) -> Address {
    let public_key_bytes = public_key.serialize_uncompressed();

    let mut hasher = Keccak::v256();
    hasher.update(&public_key_bytes[1..]);

    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);

    let mut address_bytes = [0u8; 20];
    address_bytes.copy_from_slice(&hash[12..]);

    Address::from_bytes(address_bytes)
}
