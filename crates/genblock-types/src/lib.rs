//! # genblock-types
//!
//! Primitive wrappers shared across the workspace.
//!
//! All types follow Ethereum JSON-RPC conventions:
//!
//! - Quantities (`U64`, `U256`) serialize as minimal `"0x..."` hex strings
//!   and deserialize from hex strings, decimal strings, or plain numbers.
//! - Fixed-width data (`Hash`, `Address`, `Bloom`, `BlockNonce`) serializes
//!   as full-width hex, never trimmed.

pub mod bloom;
pub mod bytes;
pub mod nonce;
pub mod quantity;

pub use bloom::Bloom;
pub use bytes::Bytes;
pub use nonce::BlockNonce;
pub use quantity::{U256, U64};

// Re-export primitive types for convenience
pub use primitive_types::{H160 as Address, H256 as Hash};

use thiserror::Error;

/// Errors when parsing fixed-width hex values.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Parse a 20-byte address from hex, with or without the `0x` prefix.
///
/// Genesis alloc keys in the wild come in both forms.
pub fn parse_address(s: &str) -> Result<Address, ParseError> {
    let raw = strip_hex_prefix(s);
    let bytes = hex::decode(raw)?;
    if bytes.len() != 20 {
        return Err(ParseError::InvalidLength {
            expected: 20,
            actual: bytes.len(),
        });
    }
    Ok(Address::from_slice(&bytes))
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
