//! Account state as stored in the account trie.

use super::trie::EMPTY_TRIE_ROOT;
use super::{rlp, NodeHash};
use genblock_types::U256;

/// keccak256 of empty code; every account without code carries this.
pub const EMPTY_CODE_HASH: NodeHash = [
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03,
    0xc0, 0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85,
    0xa4, 0x70,
];

/// The four-field account body, RLP-encoded as the account trie leaf value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub nonce: u64,
    pub balance: U256,
    pub storage_root: NodeHash,
    pub code_hash: NodeHash,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: U256::ZERO,
            storage_root: EMPTY_TRIE_ROOT,
            code_hash: EMPTY_CODE_HASH,
        }
    }
}

impl Account {
    pub fn new(balance: U256) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn with_storage_root(mut self, storage_root: NodeHash) -> Self {
        self.storage_root = storage_root;
        self
    }

    pub fn with_code_hash(mut self, code_hash: NodeHash) -> Self {
        self.code_hash = code_hash;
        self
    }

    /// Canonical encoding: `[nonce, balance, storageRoot, codeHash]`.
    pub fn rlp_encode(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(110);
        payload.extend(rlp::encode_u64(self.nonce));
        payload.extend(rlp::encode_str(&self.balance.to_minimal_be_bytes()));
        payload.extend(rlp::encode_str(&self.storage_root));
        payload.extend(rlp::encode_str(&self.code_hash));
        rlp::wrap_list(&payload)
    }
}
