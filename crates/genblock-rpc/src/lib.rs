//! # genblock-rpc
//!
//! Marshals a committed genesis block into the JSON shape of an
//! `eth_getBlockByNumber` response. Quantities serialize as minimal hex,
//! fixed-width data (hashes, the nonce, the bloom) keeps its full width,
//! and fork fields appear only when the block was committed under the
//! corresponding fork rules.

use genblock_core::GenesisBlock;
use genblock_types::{Address, BlockNonce, Bloom, Bytes, Hash, U256, U64};
use serde::Serialize;

/// One block in `eth_getBlockByNumber` shape.
///
/// Serialize-only: the tool emits this, it never reads it back. Field order
/// follows the reference client's output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    pub number: U64,
    pub hash: Hash,
    pub parent_hash: Hash,
    pub nonce: BlockNonce,
    pub mix_hash: Hash,
    pub sha3_uncles: Hash,
    pub logs_bloom: Bloom,
    pub state_root: Hash,
    pub miner: Address,
    pub difficulty: U256,
    pub extra_data: Bytes,
    pub size: U64,
    pub gas_limit: U64,
    pub gas_used: U64,
    pub timestamp: U64,
    pub transactions_root: Hash,
    pub receipts_root: Hash,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawals_root: Option<Hash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_gas_used: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excess_blob_gas: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_beacon_block_root: Option<Hash>,

    pub uncles: Vec<Hash>,
    pub transactions: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawals: Option<Vec<serde_json::Value>>,
}

impl RpcBlock {
    /// Build the RPC view of a committed genesis block.
    ///
    /// A genesis block has no transactions and no uncles; the withdrawals
    /// list is present and empty exactly when the header carries a
    /// withdrawals root.
    pub fn from_genesis(block: &GenesisBlock) -> Self {
        let header = &block.header;
        Self {
            number: U64::from(header.number),
            hash: block.hash,
            parent_hash: header.parent_hash,
            nonce: header.nonce,
            mix_hash: header.mix_hash,
            sha3_uncles: header.ommers_hash,
            logs_bloom: header.logs_bloom.clone(),
            state_root: header.state_root,
            miner: header.beneficiary,
            difficulty: header.difficulty,
            extra_data: header.extra_data.clone(),
            size: U64::from(block.size),
            gas_limit: U64::from(header.gas_limit),
            gas_used: U64::from(header.gas_used),
            timestamp: U64::from(header.timestamp),
            transactions_root: header.transactions_root,
            receipts_root: header.receipts_root,
            base_fee_per_gas: header.base_fee_per_gas,
            withdrawals_root: header.withdrawals_root,
            blob_gas_used: header.blob_gas_used.map(U64::from),
            excess_blob_gas: header.excess_blob_gas.map(U64::from),
            parent_beacon_block_root: header.parent_beacon_block_root,
            uncles: Vec::new(),
            transactions: Vec::new(),
            withdrawals: header.withdrawals_root.map(|_| Vec::new()),
        }
    }

    /// Two-space-indented JSON, the tool's output format.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut out = Vec::with_capacity(2048);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(out).map_err(serde::ser::Error::custom)
    }
}
