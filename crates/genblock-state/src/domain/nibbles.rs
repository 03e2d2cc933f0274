//! Nibble paths for trie traversal.
//!
//! Trie keys are walked half a byte at a time; a 32-byte hashed key becomes
//! a path of 64 nibbles.

/// A sequence of nibbles (values 0-15).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nibbles(pub Vec<u8>);

impl Nibbles {
    /// Split bytes into nibbles, high half first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut nibbles = Vec::with_capacity(bytes.len() * 2);
        for byte in bytes {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0F);
        }
        Nibbles(nibbles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Nibble at index.
    pub fn at(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Nibbles from `start` to the end of the path.
    pub fn slice_from(&self, start: usize) -> Self {
        Nibbles(self.0[start..].to_vec())
    }

    /// Nibbles in `start..end`.
    pub fn slice_range(&self, start: usize, end: usize) -> Self {
        Nibbles(self.0[start..end].to_vec())
    }

    /// Hex-prefix encoding per Yellow Paper Appendix C.
    ///
    /// The first nibble carries the flags: bit 1 marks a leaf, bit 0 marks
    /// an odd-length path whose first nibble is packed into the prefix byte.
    pub fn hex_prefix(&self, is_leaf: bool) -> Vec<u8> {
        let odd = self.len() % 2 == 1;
        let flag = if is_leaf { 2u8 } else { 0 } + if odd { 1 } else { 0 };

        let mut out = Vec::with_capacity(self.len() / 2 + 1);
        if odd {
            out.push((flag << 4) | self.0[0]);
            for pair in self.0[1..].chunks(2) {
                out.push((pair[0] << 4) | pair[1]);
            }
        } else {
            out.push(flag << 4);
            for pair in self.0.chunks(2) {
                out.push((pair[0] << 4) | pair[1]);
            }
        }
        out
    }
}
