use crate::domain::{NodeHash, StateError};
use crate::ports::KeyValueStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local, in-memory implementation of `KeyValueStore`.
///
/// Created fresh for each invocation and discarded at exit; there is no
/// persistence and no sharing across invocations.
pub struct MemoryStore {
    entries: RwLock<HashMap<NodeHash, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries. Useful for tests and debug logging.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &NodeHash) -> Result<Option<Vec<u8>>, StateError> {
        let entries = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: NodeHash, value: Vec<u8>) -> Result<(), StateError> {
        let mut entries = self.entries.write().map_err(|_| StateError::LockPoisoned)?;
        entries.insert(key, value);
        Ok(())
    }

    fn put_batch(&self, batch: Vec<(NodeHash, Vec<u8>)>) -> Result<(), StateError> {
        let mut entries = self.entries.write().map_err(|_| StateError::LockPoisoned)?;
        for (key, value) in batch {
            entries.insert(key, value);
        }
        Ok(())
    }

    fn delete(&self, key: &NodeHash) -> Result<(), StateError> {
        let mut entries = self.entries.write().map_err(|_| StateError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}
