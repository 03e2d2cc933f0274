//! Minimal RLP encoding helpers.
//!
//! Only the encoding direction is needed here: trie nodes, account bodies,
//! and block headers are hashed, never parsed back.

use super::NodeHash;
use sha3::{Digest, Keccak256};

/// RLP-encode a byte string.
pub fn encode_str(data: &[u8]) -> Vec<u8> {
    if data.len() == 1 && data[0] < 0x80 {
        vec![data[0]]
    } else if data.len() < 56 {
        let mut out = Vec::with_capacity(1 + data.len());
        out.push(0x80 + data.len() as u8);
        out.extend_from_slice(data);
        out
    } else {
        let len_bytes = encode_length(data.len());
        let mut out = Vec::with_capacity(1 + len_bytes.len() + data.len());
        out.push(0xb7 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
        out.extend_from_slice(data);
        out
    }
}

/// Wrap an already-encoded concatenation of items into an RLP list.
pub fn wrap_list(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    if payload.len() < 56 {
        out.push(0xc0 + payload.len() as u8);
    } else {
        let len_bytes = encode_length(payload.len());
        out.push(0xf7 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
    out.extend_from_slice(payload);
    out
}

/// RLP-encode an unsigned integer: minimal big-endian bytes, zero is the
/// empty string.
pub fn encode_u64(value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0x80];
    }
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(7);
    encode_str(&bytes[first..])
}

/// Encode a length as minimal big-endian bytes.
fn encode_length(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[start..].to_vec()
}

/// Compute the Keccak-256 hash.
pub fn keccak256(data: &[u8]) -> NodeHash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_dog() {
        assert_eq!(encode_str(b"dog"), vec![0x83, b'd', b'o', b'g']);
    }

    #[test]
    fn test_encode_empty_string() {
        assert_eq!(encode_str(b""), vec![0x80]);
    }

    #[test]
    fn test_encode_single_low_byte() {
        assert_eq!(encode_str(&[0x0f]), vec![0x0f]);
    }

    #[test]
    fn test_encode_cat_dog_list() {
        let payload: Vec<u8> = [encode_str(b"cat"), encode_str(b"dog")].concat();
        assert_eq!(
            wrap_list(&payload),
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
    }

    #[test]
    fn test_encode_empty_list() {
        assert_eq!(wrap_list(&[]), vec![0xc0]);
    }

    #[test]
    fn test_encode_integers() {
        assert_eq!(encode_u64(0), vec![0x80]);
        assert_eq!(encode_u64(15), vec![0x0f]);
        assert_eq!(encode_u64(1024), vec![0x82, 0x04, 0x00]);
    }

    #[test]
    fn test_long_string_header() {
        let data = vec![0xAA; 60];
        let encoded = encode_str(&data);
        assert_eq!(encoded[0], 0xb8);
        assert_eq!(encoded[1], 60);
        assert_eq!(encoded.len(), 62);
    }

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }
}
