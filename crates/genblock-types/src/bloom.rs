//! 2048-bit logs bloom filter.
//!
//! A genesis block carries no logs, so in practice this is always the zero
//! bloom, but the RPC shape still serializes the full 256 bytes of hex.

use serde::{Serialize, Serializer};

pub const BLOOM_BYTES: usize = 256;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Bloom(pub [u8; BLOOM_BYTES]);

impl Bloom {
    pub fn zero() -> Self {
        Bloom([0u8; BLOOM_BYTES])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl Default for Bloom {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Debug for Bloom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bloom(0x{})", hex::encode(self.0))
    }
}

impl Serialize for Bloom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}
