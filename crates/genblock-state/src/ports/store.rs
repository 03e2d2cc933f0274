use crate::domain::{NodeHash, StateError};

/// Key-value store abstraction.
///
/// Everything written during genesis commitment is content-addressed:
/// trie nodes and contract code are both stored under their keccak hash.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &NodeHash) -> Result<Option<Vec<u8>>, StateError>;
    fn put(&self, key: NodeHash, value: Vec<u8>) -> Result<(), StateError>;
    fn put_batch(&self, batch: Vec<(NodeHash, Vec<u8>)>) -> Result<(), StateError>;
    fn delete(&self, key: &NodeHash) -> Result<(), StateError>;
}
