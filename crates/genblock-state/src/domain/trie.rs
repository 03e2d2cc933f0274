//! Build-once secure trie construction.
//!
//! Genesis commitment never updates or deletes: the full key set is known up
//! front, so the trie is assembled in one recursive pass over the sorted
//! entries instead of via incremental insertion.

use super::nibbles::Nibbles;
use super::node::Node;
use super::{rlp, NodeHash, StateError};
use crate::ports::KeyValueStore;
use tracing::debug;

/// keccak256(rlp("")), the root of an empty trie.
pub const EMPTY_TRIE_ROOT: NodeHash = [
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8,
    0x6e, 0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63,
    0xb4, 0x21,
];

/// Hash a raw key into its secure trie key.
///
/// Both the account trie and storage tries are "secure" tries: the path is
/// keccak256 of the address / slot, not the raw bytes.
pub fn secure_key(raw: &[u8]) -> NodeHash {
    rlp::keccak256(raw)
}

/// Builds a trie from a full entry set and commits its nodes to a store.
pub struct TrieBuilder<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> TrieBuilder<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Build the trie over `entries` (32-byte secure keys to raw values),
    /// write every hashed node plus the root node to the store, and return
    /// the root hash.
    ///
    /// Keys must be distinct; they come out of maps in practice.
    pub fn commit(&self, mut entries: Vec<(NodeHash, Vec<u8>)>) -> Result<NodeHash, StateError> {
        if entries.is_empty() {
            return Ok(EMPTY_TRIE_ROOT);
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let items: Vec<(Nibbles, Vec<u8>)> = entries
            .into_iter()
            .map(|(key, value)| (Nibbles::from_bytes(&key), value))
            .collect();

        let root = build_node(&items, 0);

        let mut sink = Vec::new();
        let encoded = root.encode(&mut sink);
        // The root is always addressed by hash, regardless of size.
        let root_hash = rlp::keccak256(&encoded);
        sink.push((root_hash, encoded));

        debug!(nodes = sink.len(), "committing trie nodes");
        self.store.put_batch(sink)?;
        Ok(root_hash)
    }
}

/// Assemble the node covering `items`, all of which share their first
/// `depth` nibbles. `items` is sorted and non-empty.
fn build_node(items: &[(Nibbles, Vec<u8>)], depth: usize) -> Node {
    if items.len() == 1 {
        let (path, value) = &items[0];
        return Node::Leaf {
            path: path.slice_from(depth),
            value: value.clone(),
        };
    }

    // Shared prefix of the whole (sorted) group is the shared prefix of its
    // first and last keys.
    let first = &items[0].0;
    let last = &items[items.len() - 1].0;
    let mut split = depth;
    while split < first.len() && first.at(split) == last.at(split) {
        split += 1;
    }

    if split > depth {
        return Node::Extension {
            path: first.slice_range(depth, split),
            child: Box::new(build_branch(items, split)),
        };
    }
    build_branch(items, depth)
}

fn build_branch(items: &[(Nibbles, Vec<u8>)], depth: usize) -> Node {
    let mut children: [Option<Box<Node>>; 16] = std::array::from_fn(|_| None);

    let mut start = 0;
    while start < items.len() {
        let nibble = items[start].0.at(depth);
        let mut end = start + 1;
        while end < items.len() && items[end].0.at(depth) == nibble {
            end += 1;
        }
        children[nibble as usize] = Some(Box::new(build_node(&items[start..end], depth + 1)));
        start = end;
    }

    Node::Branch { children }
}
