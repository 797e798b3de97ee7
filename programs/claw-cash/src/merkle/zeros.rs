//! Empty-subtree hashes
//!
//! Level 0 = a subtree of two absent leaves.
//! Level i = hash of two empty level i-1 subtrees.
//!
//! # Note
//! The sibling of an absent node is the literal [`ZERO_LEAF`] at the leaf
//! layer and a *hashed* empty subtree above it. The accumulator and the
//! proof builder both go through [`ZeroHashes::empty_sibling`]; any other
//! padding rule produces roots that no proof verifies against.

use crate::constants::{MAX_TREE_DEPTH, ZERO_LEAF};
use crate::crypto::hash_pair;

/// Precomputed empty-subtree hashes for a tree of `DEPTH` levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZeroHashes<const DEPTH: usize> {
    levels: [[u8; 32]; DEPTH],
}

impl<const DEPTH: usize> ZeroHashes<DEPTH> {
    const DEPTH_IN_RANGE: () = assert!(
        DEPTH >= 1 && DEPTH <= MAX_TREE_DEPTH,
        "tree depth must be between 1 and MAX_TREE_DEPTH"
    );

    /// Compute `levels[0] = H(ZERO_LEAF || ZERO_LEAF)`,
    /// `levels[i] = H(levels[i-1] || levels[i-1])`.
    pub fn new() -> Self {
        let () = Self::DEPTH_IN_RANGE;

        let mut levels = [ZERO_LEAF; DEPTH];
        let mut below = ZERO_LEAF;
        for slot in levels.iter_mut() {
            below = hash_pair(&below, &below);
            *slot = below;
        }
        Self { levels }
    }

    /// Hash of an empty subtree spanning `2^(level + 1)` leaves.
    pub fn level(&self, level: usize) -> Option<[u8; 32]> {
        self.levels.get(level).copied()
    }

    /// Stand-in for an absent sibling of a node sitting at `level`.
    #[inline]
    pub fn empty_sibling(&self, level: usize) -> [u8; 32] {
        match level.checked_sub(1) {
            None => ZERO_LEAF,
            Some(below) => self.levels[below],
        }
    }

    /// Root of a tree with no leaves.
    #[inline]
    pub fn empty_root(&self) -> [u8; 32] {
        self.levels[DEPTH - 1]
    }

    pub fn as_slice(&self) -> &[[u8; 32]] {
        &self.levels
    }
}

impl<const DEPTH: usize> Default for ZeroHashes<DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}
