//! EVM address representation and utilities.

use std::fmt;

/// Number of hex digits in an address, excluding the `0x` marker.
pub const ADDRESS_HEX_LEN: usize = 40;

/// An EVM address (20 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Creates an address from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the address as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns the address as a lowercase hex string (without 0x prefix).
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the address with EIP-55 mixed-case checksum and 0x prefix.
    pub fn to_checksum(&self) -> String {
        use tiny_keccak::{Hasher, Keccak};

        let hex_addr = self.to_hex();
        let mut hasher = Keccak::v256();
        hasher.update(hex_addr.as_bytes());
        let mut hash = [0u8; 32];
        hasher.finalize(&mut hash);

        let mut checksum = String::with_capacity(2 + ADDRESS_HEX_LEN);
        checksum.push_str("0x");

        for (i, c) in hex_addr.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };

            if c.is_ascii_alphabetic() && nibble >= 8 {
                checksum.push(c.to_ascii_uppercase());
            } else {
                checksum.push(c);
            }
        }

        checksum
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}
