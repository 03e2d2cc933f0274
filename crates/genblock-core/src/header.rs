//! Block header with canonical RLP encoding and hashing.

use genblock_state::{rlp, EMPTY_TRIE_ROOT};
use genblock_types::{Address, BlockNonce, Bloom, Bytes, Hash, U256};

/// keccak256(rlp([])), the ommers hash of a block with no uncles.
pub const EMPTY_OMMERS_HASH: [u8; 32] = [
    0x1d, 0xcc, 0x4d, 0xe8, 0xde, 0xc7, 0x5d, 0x7a, 0xab, 0x85, 0xb5, 0x67, 0xb6, 0xcc, 0xd4,
    0x1a, 0xd3, 0x12, 0x45, 0x1b, 0x94, 0x8a, 0x74, 0x13, 0xf0, 0xa1, 0x42, 0xfd, 0x40, 0xd4,
    0x93, 0x47,
];

/// Default difficulty for a proof-of-work genesis that specifies none.
pub const GENESIS_DIFFICULTY: u64 = 131_072;

/// Default gas limit when the config leaves it zero or unset.
pub const GENESIS_GAS_LIMIT: u64 = 4_712_388;

/// EIP-1559 initial base fee (1 gwei), applied when London is active at
/// genesis and the config sets no explicit base fee.
pub const INITIAL_BASE_FEE: u64 = 1_000_000_000;

/// A block header.
///
/// The five trailing fields only exist from their respective forks on and
/// are omitted from the RLP encoding when absent, which is what keeps
/// pre-fork block hashes stable.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockHeader {
    pub parent_hash: Hash,
    pub ommers_hash: Hash,
    pub beneficiary: Address,
    pub state_root: Hash,
    pub transactions_root: Hash,
    pub receipts_root: Hash,
    pub logs_bloom: Bloom,
    pub difficulty: U256,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Bytes,
    pub mix_hash: Hash,
    pub nonce: BlockNonce,
    /// London (EIP-1559).
    pub base_fee_per_gas: Option<U256>,
    /// Shanghai (EIP-4895).
    pub withdrawals_root: Option<Hash>,
    /// Cancun (EIP-4844).
    pub blob_gas_used: Option<u64>,
    /// Cancun (EIP-4844).
    pub excess_blob_gas: Option<u64>,
    /// Cancun (EIP-4788).
    pub parent_beacon_block_root: Option<Hash>,
}

impl BlockHeader {
    /// Canonical header RLP.
    pub fn rlp_encode(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(700);
        payload.extend(rlp::encode_str(self.parent_hash.as_bytes()));
        payload.extend(rlp::encode_str(self.ommers_hash.as_bytes()));
        payload.extend(rlp::encode_str(self.beneficiary.as_bytes()));
        payload.extend(rlp::encode_str(self.state_root.as_bytes()));
        payload.extend(rlp::encode_str(self.transactions_root.as_bytes()));
        payload.extend(rlp::encode_str(self.receipts_root.as_bytes()));
        payload.extend(rlp::encode_str(self.logs_bloom.as_bytes()));
        payload.extend(rlp::encode_str(&self.difficulty.to_minimal_be_bytes()));
        payload.extend(rlp::encode_u64(self.number));
        payload.extend(rlp::encode_u64(self.gas_limit));
        payload.extend(rlp::encode_u64(self.gas_used));
        payload.extend(rlp::encode_u64(self.timestamp));
        payload.extend(rlp::encode_str(self.extra_data.as_slice()));
        payload.extend(rlp::encode_str(self.mix_hash.as_bytes()));
        payload.extend(rlp::encode_str(self.nonce.as_bytes()));
        payload.extend(self.encode_fork_fields());
        rlp::wrap_list(&payload)
    }

    /// Encode the optional trailing fields through the last one present.
    /// A gap in the middle encodes as an empty string, matching how the
    /// reference encoder treats a nil optional followed by a set one.
    fn encode_fork_fields(&self) -> Vec<u8> {
        let items: [Option<Vec<u8>>; 5] = [
            self.base_fee_per_gas
                .map(|fee| rlp::encode_str(&fee.to_minimal_be_bytes())),
            self.withdrawals_root
                .map(|root| rlp::encode_str(root.as_bytes())),
            self.blob_gas_used.map(rlp::encode_u64),
            self.excess_blob_gas.map(rlp::encode_u64),
            self.parent_beacon_block_root
                .map(|root| rlp::encode_str(root.as_bytes())),
        ];

        let mut out = Vec::new();
        if let Some(last) = items.iter().rposition(|item| item.is_some()) {
            for item in items.into_iter().take(last + 1) {
                out.extend(item.unwrap_or_else(|| vec![0x80]));
            }
        }
        out
    }

    /// Block hash: keccak256 of the header RLP.
    pub fn hash(&self) -> Hash {
        Hash::from(rlp::keccak256(&self.rlp_encode()))
    }

    /// RLP size of the full block: header plus empty transaction and ommer
    /// lists, plus an empty withdrawals list once Shanghai is active.
    pub fn block_rlp_size(&self) -> u64 {
        let mut payload = self.rlp_encode();
        payload.extend(rlp::wrap_list(&[])); // transactions
        payload.extend(rlp::wrap_list(&[])); // ommers
        if self.withdrawals_root.is_some() {
            payload.extend(rlp::wrap_list(&[])); // withdrawals
        }
        rlp::wrap_list(&payload).len() as u64
    }
}

impl Default for BlockHeader {
    fn default() -> Self {
        Self {
            parent_hash: Hash::zero(),
            ommers_hash: Hash::from(EMPTY_OMMERS_HASH),
            beneficiary: Address::zero(),
            state_root: Hash::from(EMPTY_TRIE_ROOT),
            transactions_root: Hash::from(EMPTY_TRIE_ROOT),
            receipts_root: Hash::from(EMPTY_TRIE_ROOT),
            logs_bloom: Bloom::zero(),
            difficulty: U256::ZERO,
            number: 0,
            gas_limit: 0,
            gas_used: 0,
            timestamp: 0,
            extra_data: Bytes::new(),
            mix_hash: Hash::zero(),
            nonce: BlockNonce::default(),
            base_fee_per_gas: None,
            withdrawals_root: None,
            blob_gas_used: None,
            excess_blob_gas: None,
            parent_beacon_block_root: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ommers_hash_constant() {
        // keccak256 of the empty RLP list 0xc0
        assert_eq!(rlp::keccak256(&[0xc0]), EMPTY_OMMERS_HASH);
    }

    #[test]
    fn test_header_hash_is_deterministic() {
        let header = BlockHeader {
            difficulty: U256::from(GENESIS_DIFFICULTY),
            gas_limit: GENESIS_GAS_LIMIT,
            ..Default::default()
        };
        assert_eq!(header.hash(), header.hash());
    }

    #[test]
    fn test_fork_fields_extend_the_encoding() {
        let legacy = BlockHeader::default();
        let london = BlockHeader {
            base_fee_per_gas: Some(U256::from(INITIAL_BASE_FEE)),
            ..Default::default()
        };
        let cancun = BlockHeader {
            base_fee_per_gas: Some(U256::from(INITIAL_BASE_FEE)),
            withdrawals_root: Some(Hash::from(EMPTY_TRIE_ROOT)),
            blob_gas_used: Some(0),
            excess_blob_gas: Some(0),
            parent_beacon_block_root: Some(Hash::zero()),
            ..Default::default()
        };

        let legacy_len = legacy.rlp_encode().len();
        let london_len = london.rlp_encode().len();
        let cancun_len = cancun.rlp_encode().len();
        assert!(legacy_len < london_len);
        assert!(london_len < cancun_len);

        assert_ne!(legacy.hash(), london.hash());
        assert_ne!(london.hash(), cancun.hash());
    }

    #[test]
    fn test_block_size_grows_with_withdrawals_list() {
        let pre_shanghai = BlockHeader::default();
        let post_shanghai = BlockHeader {
            withdrawals_root: Some(Hash::from(EMPTY_TRIE_ROOT)),
            ..Default::default()
        };
        // 33 bytes of withdrawals root item + 1 byte of empty list
        assert!(post_shanghai.block_rlp_size() > pre_shanghai.block_rlp_size());
    }

    #[test]
    fn test_legacy_header_encoding_layout() {
        let header = BlockHeader::default();
        let encoded = header.rlp_encode();
        // The bloom pushes the payload past 255 bytes, so the list header
        // is 0xf9 plus two length bytes.
        assert_eq!(encoded[0], 0xf9);
        // First item: 0xa0 followed by 32 zero bytes.
        assert_eq!(encoded[3], 0xa0);
        assert_eq!(&encoded[4..36], &[0u8; 32]);
    }
}
