//! Genesis configuration schema.
//!
//! Mirrors the geth genesis JSON: a `config` object with per-fork activation
//! points, top-level header seed fields, and the `alloc` map of prefunded
//! accounts. Unknown fields are ignored so configs from newer clients still
//! load.

use crate::errors::GenesisError;
use genblock_types::{parse_address, Address, Bytes, Hash, U256, U64};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Per-chain consensus parameters and fork activation points.
///
/// Pre-merge forks activate at a block number, post-merge forks at a
/// timestamp. `None` means the fork never activates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChainConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homestead_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dao_fork_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dao_fork_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eip150_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eip155_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eip158_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byzantium_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constantinople_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petersburg_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub istanbul_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muir_glacier_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub berlin_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub london_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_glacier_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gray_glacier_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_netsplit_block: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shanghai_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancun_time: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_total_difficulty: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_total_difficulty_passed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethash: Option<EthashConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clique: Option<CliqueConfig>,
}

/// Proof-of-work engine marker; carries no parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EthashConfig {}

/// Proof-of-authority engine parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliqueConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u64>,
}

impl ChainConfig {
    pub fn is_london_active(&self, block: u64) -> bool {
        self.london_block.is_some_and(|at| at <= block)
    }

    pub fn is_shanghai_active(&self, timestamp: u64) -> bool {
        self.shanghai_time.is_some_and(|at| at <= timestamp)
    }

    pub fn is_cancun_active(&self, timestamp: u64) -> bool {
        self.cancun_time.is_some_and(|at| at <= timestamp)
    }

    /// Reject configs whose forks activate out of order.
    ///
    /// Skipped forks are allowed; among the configured ones, activation
    /// points must be non-decreasing (block forks and time forks checked
    /// separately).
    pub fn validate_fork_order(&self) -> Result<(), GenesisError> {
        check_order(&[
            ("homesteadBlock", self.homestead_block),
            ("daoForkBlock", self.dao_fork_block),
            ("eip150Block", self.eip150_block),
            ("eip155Block", self.eip155_block),
            ("eip158Block", self.eip158_block),
            ("byzantiumBlock", self.byzantium_block),
            ("constantinopleBlock", self.constantinople_block),
            ("petersburgBlock", self.petersburg_block),
            ("istanbulBlock", self.istanbul_block),
            ("muirGlacierBlock", self.muir_glacier_block),
            ("berlinBlock", self.berlin_block),
            ("londonBlock", self.london_block),
            ("arrowGlacierBlock", self.arrow_glacier_block),
            ("grayGlacierBlock", self.gray_glacier_block),
            ("mergeNetsplitBlock", self.merge_netsplit_block),
        ])?;
        check_order(&[
            ("shanghaiTime", self.shanghai_time),
            ("cancunTime", self.cancun_time),
        ])
    }
}

fn check_order(forks: &[(&'static str, Option<u64>)]) -> Result<(), GenesisError> {
    let mut prior: Option<(&'static str, u64)> = None;
    for (name, activation) in forks {
        if let Some(at) = activation {
            if let Some((prior_name, prior_at)) = prior {
                if prior_at > *at {
                    return Err(GenesisError::ForkOrder {
                        prior: prior_name,
                        prior_at,
                        fork: name,
                        at: *at,
                    });
                }
            }
            prior = Some((name, *at));
        }
    }
    Ok(())
}

/// A prefunded account in the genesis allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisAccount {
    /// Initial balance in wei. The one field every alloc entry must carry.
    pub balance: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<BTreeMap<Hash, Hash>>,
}

/// The genesis configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenesisConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ChainConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mix_hash: Option<Hash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<Address>,

    /// Prefunded accounts, keyed by address (`0x` prefix optional).
    #[serde(deserialize_with = "de_alloc")]
    pub alloc: BTreeMap<Address, GenesisAccount>,

    // Fields below are used by dev chains to seed a non-default header;
    // a real genesis leaves them unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_hash: Option<Hash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excess_blob_gas: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_gas_used: Option<U64>,
}

/// Alloc keys in the wild come both `0x`-prefixed and bare.
fn de_alloc<'de, D>(deserializer: D) -> Result<BTreeMap<Address, GenesisAccount>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, GenesisAccount>::deserialize(deserializer)?;
    let mut alloc = BTreeMap::new();
    for (key, account) in raw {
        let address = parse_address(&key)
            .map_err(|err| de::Error::custom(format!("invalid alloc address {key:?}: {err}")))?;
        alloc.insert(address, account);
    }
    Ok(alloc)
}
