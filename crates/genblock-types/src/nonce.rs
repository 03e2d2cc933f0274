//! 8-byte block nonce.
//!
//! Unlike quantities, the nonce is fixed-width data in the RPC shape:
//! always 16 hex characters, e.g. `"0x0000000000000042"`.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockNonce(pub [u8; 8]);

impl BlockNonce {
    pub fn from_u64(v: u64) -> Self {
        BlockNonce(v.to_be_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<u64> for BlockNonce {
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}

impl Serialize for BlockNonce {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}
