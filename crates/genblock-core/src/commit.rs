//! Genesis commitment: allocation -> state trie -> genesis block.

use crate::config::{ChainConfig, GenesisAccount, GenesisConfig};
use crate::errors::GenesisError;
use crate::header::{
    BlockHeader, EMPTY_OMMERS_HASH, GENESIS_DIFFICULTY, GENESIS_GAS_LIMIT, INITIAL_BASE_FEE,
};
use genblock_state::{
    secure_key, Account, KeyValueStore, NodeHash, TrieBuilder, EMPTY_TRIE_ROOT,
};
use genblock_types::{Address, BlockNonce, Bloom, Hash, U256};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Materialize per-account storage tries in parallel once the allocation is
/// big enough to pay for the fan-out.
const PARALLEL_THRESHOLD: usize = 4;

/// The committed genesis block: header plus derived hash and RLP size.
/// A genesis block has no transactions and no uncles, so the header is the
/// whole story.
#[derive(Debug, Clone, PartialEq)]
pub struct GenesisBlock {
    pub header: BlockHeader,
    pub hash: Hash,
    pub size: u64,
}

impl GenesisBlock {
    /// Whether the block was committed under Shanghai rules (and therefore
    /// carries an empty withdrawals list in its RPC shape).
    pub fn has_withdrawals(&self) -> bool {
        self.header.withdrawals_root.is_some()
    }
}

/// Commit a genesis configuration against a fresh store and return the
/// resulting block.
///
/// Deterministic: the same configuration always produces the same block,
/// byte for byte.
pub fn commit<S: KeyValueStore>(
    genesis: &GenesisConfig,
    store: &S,
) -> Result<GenesisBlock, GenesisError> {
    let number = genesis.number.map(|n| n.as_u64()).unwrap_or(0);
    if number != 0 {
        return Err(GenesisError::NonZeroNumber(number));
    }

    if let Some(config) = &genesis.config {
        config.validate_fork_order()?;
        // Clique signers are listed in extraData, between the 32-byte vanity
        // prefix and the 65-byte seal suffix.
        let has_extra_data = genesis.extra_data.as_ref().is_some_and(|data| !data.is_empty());
        if config.clique.is_some() && !has_extra_data {
            return Err(GenesisError::CliqueWithoutSigners);
        }
    }

    let state_root = commit_alloc(&genesis.alloc, store)?;
    debug!(
        accounts = genesis.alloc.len(),
        state_root = %Hash::from(state_root),
        "genesis state committed"
    );

    let default_config = ChainConfig::default();
    let config = genesis.config.as_ref().unwrap_or(&default_config);
    let timestamp = genesis.timestamp.map(|t| t.as_u64()).unwrap_or(0);

    // A proof-of-work genesis without an explicit difficulty gets the
    // protocol default; a post-merge genesis (zero mix hash is the tell)
    // keeps difficulty at zero only when it says so explicitly.
    let difficulty = match genesis.difficulty {
        Some(difficulty) => difficulty,
        None if genesis.mix_hash.is_none_or(|mix| mix.is_zero()) => {
            U256::from(GENESIS_DIFFICULTY)
        }
        None => U256::ZERO,
    };

    let gas_limit = match genesis.gas_limit.map(|g| g.as_u64()) {
        Some(limit) if limit != 0 => limit,
        _ => GENESIS_GAS_LIMIT,
    };

    let london = config.is_london_active(number);
    let shanghai = config.is_shanghai_active(timestamp);
    let cancun = config.is_cancun_active(timestamp);

    let header = BlockHeader {
        parent_hash: genesis.parent_hash.unwrap_or_default(),
        ommers_hash: Hash::from(EMPTY_OMMERS_HASH),
        beneficiary: genesis.coinbase.unwrap_or_default(),
        state_root: Hash::from(state_root),
        transactions_root: Hash::from(EMPTY_TRIE_ROOT),
        receipts_root: Hash::from(EMPTY_TRIE_ROOT),
        logs_bloom: Bloom::zero(),
        difficulty,
        number,
        gas_limit,
        gas_used: genesis.gas_used.map(|g| g.as_u64()).unwrap_or(0),
        timestamp,
        extra_data: genesis.extra_data.clone().unwrap_or_default(),
        mix_hash: genesis.mix_hash.unwrap_or_default(),
        nonce: BlockNonce::from_u64(genesis.nonce.map(|n| n.as_u64()).unwrap_or(0)),
        base_fee_per_gas: london.then(|| {
            genesis
                .base_fee_per_gas
                .unwrap_or(U256::from(INITIAL_BASE_FEE))
        }),
        withdrawals_root: shanghai.then(|| Hash::from(EMPTY_TRIE_ROOT)),
        blob_gas_used: cancun.then(|| genesis.blob_gas_used.map(|g| g.as_u64()).unwrap_or(0)),
        excess_blob_gas: cancun.then(|| genesis.excess_blob_gas.map(|g| g.as_u64()).unwrap_or(0)),
        parent_beacon_block_root: cancun.then(Hash::zero),
    };

    let hash = header.hash();
    let size = header.block_rlp_size();
    debug!(block_hash = %hash, size, "genesis block assembled");

    Ok(GenesisBlock { header, hash, size })
}

/// Write the allocation into the store and return the account trie root.
fn commit_alloc<S: KeyValueStore>(
    alloc: &BTreeMap<Address, GenesisAccount>,
    store: &S,
) -> Result<NodeHash, GenesisError> {
    let accounts: Vec<(&Address, &GenesisAccount)> = alloc.iter().collect();

    let entries: Vec<(NodeHash, Vec<u8>)> = if accounts.len() < PARALLEL_THRESHOLD {
        accounts
            .into_iter()
            .map(|(address, account)| materialize_account(address, account, store))
            .collect::<Result<_, _>>()?
    } else {
        accounts
            .into_par_iter()
            .map(|(address, account)| materialize_account(address, account, store))
            .collect::<Result<_, _>>()?
    };

    Ok(TrieBuilder::new(store).commit(entries)?)
}

/// Produce the `(secure key, account RLP)` entry for one alloc account,
/// committing its storage trie and code to the store along the way.
fn materialize_account<S: KeyValueStore>(
    address: &Address,
    account: &GenesisAccount,
    store: &S,
) -> Result<(NodeHash, Vec<u8>), GenesisError> {
    let storage_root = match &account.storage {
        Some(storage) if !storage.is_empty() => {
            let entries: Vec<(NodeHash, Vec<u8>)> = storage
                .iter()
                .filter(|(_, value)| !value.is_zero())
                .map(|(slot, value)| {
                    let trimmed = strip_leading_zeros(value.as_bytes());
                    (
                        secure_key(slot.as_bytes()),
                        genblock_state::rlp::encode_str(trimmed),
                    )
                })
                .collect();
            TrieBuilder::new(store).commit(entries)?
        }
        _ => EMPTY_TRIE_ROOT,
    };

    let code_hash = match &account.code {
        Some(code) if !code.is_empty() => {
            let hash = genblock_state::rlp::keccak256(code.as_slice());
            store.put(hash, code.as_slice().to_vec())?;
            hash
        }
        _ => genblock_state::EMPTY_CODE_HASH,
    };

    let body = Account::new(account.balance)
        .with_nonce(account.nonce.map(|n| n.as_u64()).unwrap_or(0))
        .with_storage_root(storage_root)
        .with_code_hash(code_hash);

    Ok((secure_key(address.as_bytes()), body.rlp_encode()))
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use genblock_state::MemoryStore;
    use genblock_types::{Bytes, U64};

    fn minimal_genesis() -> GenesisConfig {
        serde_json::from_str(
            r#"{"config":{"chainId":1},"difficulty":"0x1","gasLimit":"0x1000000","alloc":{}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_minimal_genesis_commit() {
        let store = MemoryStore::new();
        let block = commit(&minimal_genesis(), &store).unwrap();

        assert_eq!(block.header.number, 0);
        assert_eq!(block.header.difficulty, U256::from(1u64));
        assert_eq!(block.header.gas_limit, 0x100_0000);
        assert_eq!(block.header.state_root, Hash::from(EMPTY_TRIE_ROOT));
        assert_eq!(block.header.parent_hash, Hash::zero());
        assert!(block.header.base_fee_per_gas.is_none());
        assert_eq!(block.hash, block.header.hash());
    }

    #[test]
    fn test_commit_is_deterministic() {
        let genesis = minimal_genesis();
        let block_a = commit(&genesis, &MemoryStore::new()).unwrap();
        let block_b = commit(&genesis, &MemoryStore::new()).unwrap();
        assert_eq!(block_a, block_b);
    }

    #[test]
    fn test_defaults_applied() {
        let genesis: GenesisConfig = serde_json::from_str(r#"{"alloc":{}}"#).unwrap();
        let block = commit(&genesis, &MemoryStore::new()).unwrap();

        assert_eq!(block.header.difficulty, U256::from(GENESIS_DIFFICULTY));
        assert_eq!(block.header.gas_limit, GENESIS_GAS_LIMIT);
        assert_eq!(block.header.gas_used, 0);
    }

    #[test]
    fn test_nonzero_number_rejected() {
        let mut genesis = minimal_genesis();
        genesis.number = Some(U64::from(7));
        let err = commit(&genesis, &MemoryStore::new()).unwrap_err();
        assert!(matches!(err, GenesisError::NonZeroNumber(7)));
    }

    #[test]
    fn test_fork_order_violation_rejected() {
        let mut genesis = minimal_genesis();
        genesis.config.as_mut().unwrap().berlin_block = Some(10);
        genesis.config.as_mut().unwrap().london_block = Some(5);
        let err = commit(&genesis, &MemoryStore::new()).unwrap_err();
        assert!(matches!(err, GenesisError::ForkOrder { .. }));
    }

    #[test]
    fn test_clique_requires_signers_in_extra_data() {
        // A funded alloc does not stand in for signers.
        let genesis: GenesisConfig = serde_json::from_str(
            r#"{"config":{"chainId":5,"clique":{"period":15,"epoch":30000}},
                "alloc":{"0x001d14804b399c6ef80e64576f657660804fec0b":
                    {"balance":"0xad78ebc5ac6200000"}}}"#,
        )
        .unwrap();
        let err = commit(&genesis, &MemoryStore::new()).unwrap_err();
        assert!(matches!(err, GenesisError::CliqueWithoutSigners));
    }

    #[test]
    fn test_clique_with_signers_in_extra_data_commits() {
        // Goerli-style: 32-byte vanity, one 20-byte signer, 65-byte seal.
        // The alloc can be empty; signers live in extraData.
        let extra_data = format!(
            "0x{}{}{}",
            "00".repeat(32),
            "001d14804b399c6ef80e64576f657660804fec0b",
            "00".repeat(65)
        );
        let genesis: GenesisConfig = serde_json::from_str(&format!(
            r#"{{"config":{{"chainId":5,"clique":{{"period":15,"epoch":30000}}}},
                "extraData":"{extra_data}","alloc":{{}}}}"#,
        ))
        .unwrap();
        let block = commit(&genesis, &MemoryStore::new()).unwrap();
        assert_eq!(block.header.extra_data.len(), 32 + 20 + 65);
    }

    #[test]
    fn test_alloc_changes_state_root() {
        let genesis: GenesisConfig = serde_json::from_str(
            r#"{"difficulty":"0x1","alloc":{
                "0x001d14804b399c6ef80e64576f657660804fec0b": {"balance": "0xad78ebc5ac6200000"}
            }}"#,
        )
        .unwrap();
        let store = MemoryStore::new();
        let block = commit(&genesis, &store).unwrap();

        assert_ne!(block.header.state_root, Hash::from(EMPTY_TRIE_ROOT));
        // The account trie root node must live in the store.
        let root: NodeHash = block.header.state_root.into();
        assert!(store.get(&root).unwrap().is_some());
    }

    #[test]
    fn test_code_written_under_its_hash() {
        let code = Bytes::from_slice(&[0x60, 0x01, 0x60, 0x00]);
        let genesis: GenesisConfig = serde_json::from_str(
            r#"{"alloc":{"0x001d14804b399c6ef80e64576f657660804fec0b":
                {"balance":"0x0","code":"0x60016000"}}}"#,
        )
        .unwrap();
        let store = MemoryStore::new();
        commit(&genesis, &store).unwrap();

        let code_key = genblock_state::rlp::keccak256(code.as_slice());
        assert_eq!(store.get(&code_key).unwrap(), Some(code.as_slice().to_vec()));
    }

    #[test]
    fn test_storage_slots_affect_root_and_skip_zero_values() {
        let with_storage: GenesisConfig = serde_json::from_str(
            r#"{"alloc":{"0x001d14804b399c6ef80e64576f657660804fec0b": {
                "balance":"0x1",
                "storage":{
                    "0x0000000000000000000000000000000000000000000000000000000000000001":
                    "0x0000000000000000000000000000000000000000000000000000000000000002"
                }}}}"#,
        )
        .unwrap();
        let zero_storage: GenesisConfig = serde_json::from_str(
            r#"{"alloc":{"0x001d14804b399c6ef80e64576f657660804fec0b": {
                "balance":"0x1",
                "storage":{
                    "0x0000000000000000000000000000000000000000000000000000000000000001":
                    "0x0000000000000000000000000000000000000000000000000000000000000000"
                }}}}"#,
        )
        .unwrap();
        let empty_storage: GenesisConfig = serde_json::from_str(
            r#"{"alloc":{"0x001d14804b399c6ef80e64576f657660804fec0b": {
                "balance":"0x1"}}}"#,
        )
        .unwrap();

        let root_with = commit(&with_storage, &MemoryStore::new()).unwrap();
        let root_zero = commit(&zero_storage, &MemoryStore::new()).unwrap();
        let root_empty = commit(&empty_storage, &MemoryStore::new()).unwrap();

        assert_ne!(root_with.header.state_root, root_empty.header.state_root);
        // A slot explicitly set to zero is the same as no slot at all.
        assert_eq!(root_zero.header.state_root, root_empty.header.state_root);
    }

    #[test]
    fn test_parallel_and_sequential_alloc_agree() {
        // Ten accounts crosses PARALLEL_THRESHOLD, so both commits take the
        // parallel path; the roots must still be identical.
        let mut alloc_entries = String::new();
        for i in 0..10 {
            if i > 0 {
                alloc_entries.push(',');
            }
            alloc_entries.push_str(&format!(
                "\"0x{:040x}\": {{\"balance\": \"0x{:x}\"}}",
                i + 1,
                (i + 1) * 1000
            ));
        }
        let json = format!("{{\"alloc\":{{{alloc_entries}}}}}");
        let genesis: GenesisConfig = serde_json::from_str(&json).unwrap();

        let block_a = commit(&genesis, &MemoryStore::new()).unwrap();
        let block_b = commit(&genesis, &MemoryStore::new()).unwrap();
        assert_eq!(block_a.header.state_root, block_b.header.state_root);
    }

    #[test]
    fn test_london_at_genesis_sets_base_fee() {
        let genesis: GenesisConfig = serde_json::from_str(
            r#"{"config":{"chainId":1,"londonBlock":0},"alloc":{}}"#,
        )
        .unwrap();
        let block = commit(&genesis, &MemoryStore::new()).unwrap();
        assert_eq!(
            block.header.base_fee_per_gas,
            Some(U256::from(INITIAL_BASE_FEE))
        );
    }

    #[test]
    fn test_explicit_base_fee_wins() {
        let genesis: GenesisConfig = serde_json::from_str(
            r#"{"config":{"chainId":1,"londonBlock":0},"baseFeePerGas":"0x7","alloc":{}}"#,
        )
        .unwrap();
        let block = commit(&genesis, &MemoryStore::new()).unwrap();
        assert_eq!(block.header.base_fee_per_gas, Some(U256::from(7u64)));
    }

    #[test]
    fn test_london_later_means_no_base_fee() {
        let genesis: GenesisConfig = serde_json::from_str(
            r#"{"config":{"chainId":1,"londonBlock":10},"alloc":{}}"#,
        )
        .unwrap();
        let block = commit(&genesis, &MemoryStore::new()).unwrap();
        assert!(block.header.base_fee_per_gas.is_none());
    }

    #[test]
    fn test_shanghai_at_genesis_sets_withdrawals_root() {
        let genesis: GenesisConfig = serde_json::from_str(
            r#"{"config":{"chainId":1,"londonBlock":0,"shanghaiTime":0},
                "timestamp":"0x10","alloc":{}}"#,
        )
        .unwrap();
        let block = commit(&genesis, &MemoryStore::new()).unwrap();
        assert_eq!(block.header.withdrawals_root, Some(Hash::from(EMPTY_TRIE_ROOT)));
        assert!(block.has_withdrawals());
        assert!(block.header.blob_gas_used.is_none());
    }

    #[test]
    fn test_cancun_at_genesis_sets_blob_fields() {
        let genesis: GenesisConfig = serde_json::from_str(
            r#"{"config":{"chainId":1,"londonBlock":0,"shanghaiTime":0,"cancunTime":0},
                "alloc":{}}"#,
        )
        .unwrap();
        let block = commit(&genesis, &MemoryStore::new()).unwrap();
        assert_eq!(block.header.blob_gas_used, Some(0));
        assert_eq!(block.header.excess_blob_gas, Some(0));
        assert_eq!(block.header.parent_beacon_block_root, Some(Hash::zero()));
    }
}
