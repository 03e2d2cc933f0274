//! # genblock-core
//!
//! Genesis semantics: the geth-style genesis config schema, fork-activation
//! rules, genesis header derivation, and the commit operation that
//! materializes the allocation into a state trie and produces the genesis
//! block.
//!
//! ## Commit flow
//!
//! 1. Validate the config (genesis number, fork ordering, clique signers).
//! 2. Materialize every alloc account: storage trie per account (parallel
//!    above a threshold), code written under its hash, account body RLP.
//! 3. Build the outer account trie; its root becomes `stateRoot`.
//! 4. Derive the remaining header fields from the config and the forks
//!    active at block zero.
//!
//! The result is immutable and deterministic for a given configuration.

pub mod commit;
pub mod config;
pub mod errors;
pub mod header;

pub use commit::*;
pub use config::*;
pub use errors::*;
pub use header::*;
