//! # genblock-state
//!
//! Ephemeral state layer: an in-memory key-value store and the
//! Merkle-Patricia-Trie machinery used to materialize a genesis allocation
//! into a state root.
//!
//! ## Role in the pipeline
//!
//! Genesis commitment creates one `MemoryStore` per invocation, builds the
//! per-account storage tries and the outer account trie with `TrieBuilder`,
//! and throws the store away when the process exits. Nothing here touches
//! disk.
//!
//! ## Layout
//!
//! - `ports/` - `KeyValueStore` abstraction
//! - `adapters/` - in-memory store implementation
//! - `domain/` - RLP, nibble paths, trie nodes, trie construction, account
//!   encoding per the Yellow Paper

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
