//! Trie node types and their canonical RLP encoding.
//!
//! Per Yellow Paper Appendix D a node is referenced from its parent either
//! by its keccak hash (a 32-byte string item) or, when its encoding is
//! shorter than 32 bytes, by splicing the encoding directly into the parent.
//! Only hashed nodes are written to the store.

use super::nibbles::Nibbles;
use super::{rlp, NodeHash};

/// A node in a build-once Merkle Patricia Trie.
///
/// Keys are fixed-length hashed paths, so no key can terminate inside a
/// branch; branch nodes never carry a value of their own.
#[derive(Clone, Debug)]
pub enum Node {
    /// Remaining path and the raw value stored under it.
    /// RLP: `[hex_prefix(path, leaf=true), value]`
    Leaf { path: Nibbles, value: Vec<u8> },

    /// Shared prefix above a branch.
    /// RLP: `[hex_prefix(path, leaf=false), child_ref]`
    Extension { path: Nibbles, child: Box<Node> },

    /// 16-way fan-out, one slot per nibble, plus the (always empty) value
    /// slot.
    Branch { children: [Option<Box<Node>>; 16] },
}

impl Node {
    /// RLP encoding of this node. Hashed descendants are appended to `sink`
    /// as `(keccak(encoding), encoding)` pairs.
    pub fn encode(&self, sink: &mut Vec<(NodeHash, Vec<u8>)>) -> Vec<u8> {
        match self {
            Node::Leaf { path, value } => {
                let payload: Vec<u8> = [
                    rlp::encode_str(&path.hex_prefix(true)),
                    rlp::encode_str(value),
                ]
                .concat();
                rlp::wrap_list(&payload)
            }

            Node::Extension { path, child } => {
                let payload: Vec<u8> = [
                    rlp::encode_str(&path.hex_prefix(false)),
                    child.reference(sink),
                ]
                .concat();
                rlp::wrap_list(&payload)
            }

            Node::Branch { children } => {
                let mut payload = Vec::with_capacity(17 * 33);
                for child in children.iter() {
                    match child {
                        Some(node) => payload.extend(node.reference(sink)),
                        None => payload.push(0x80), // empty slot
                    }
                }
                payload.push(0x80); // branch value slot, never used
                rlp::wrap_list(&payload)
            }
        }
    }

    /// RLP item referring to this node from its parent: the encoding itself
    /// when shorter than 32 bytes, otherwise the hash (with the encoding
    /// recorded in `sink` for storage).
    fn reference(&self, sink: &mut Vec<(NodeHash, Vec<u8>)>) -> Vec<u8> {
        let encoded = self.encode(sink);
        if encoded.len() < 32 {
            encoded
        } else {
            let hash = rlp::keccak256(&encoded);
            sink.push((hash, encoded));
            rlp::encode_str(&hash)
        }
    }
}
