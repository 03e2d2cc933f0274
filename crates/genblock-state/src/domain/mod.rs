pub mod account;
pub mod errors;
pub mod nibbles;
pub mod node;
pub mod rlp;
pub mod trie;

pub use account::*;
pub use errors::*;
pub use nibbles::*;
pub use node::*;
pub use trie::*;

/// 32-byte keccak hash used as a node/content key.
pub type NodeHash = [u8; 32];
