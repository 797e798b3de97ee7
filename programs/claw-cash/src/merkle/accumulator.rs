//! Incremental Merkle Tree for commitment storage
//!
//! Append-only, fixed-depth SHA-256 tree. Uses the filled_subtrees pattern
//! for O(depth) insertions: an append only changes the path from the new
//! leaf to the root, so the tree is never rebuilt and no leaf is stored.
//!
//! `filled_subtrees[level]` caches the most recent left child finalized at
//! `level`, which is exactly the left sibling the next right-hand insertion
//! at that level needs.

use std::io::{Read, Write};

use anchor_lang::prelude::*;

use super::zeros::ZeroHashes;
use crate::constants::ZERO_LEAF;
use crate::crypto::hash_pair;
use crate::error::PoolError;

/// Append-only Merkle accumulator of depth `DEPTH`.
///
/// The current root is a pure function of the ordered sequence of
/// inserted leaves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleAccumulator<const DEPTH: usize> {
    /// Next leaf index to be filled (also = total leaves inserted)
    next_index: u32,

    /// Current root hash
    current_root: [u8; 32],

    /// Rightmost finalized left child at each level
    filled_subtrees: [[u8; 32]; DEPTH],
}

impl<const DEPTH: usize> MerkleAccumulator<DEPTH> {
    /// Leaf capacity, `2^DEPTH`.
    pub const CAPACITY: u32 = 1 << DEPTH;

    /// Borsh-encoded size: next_index + current_root + filled_subtrees.
    pub const SERIALIZED_LEN: usize = 4 + 32 + 32 * DEPTH;

    /// Empty tree: root = `zeros[DEPTH-1]`, every filled subtree holds the
    /// empty value for its level.
    pub fn new() -> Self {
        let zeros = ZeroHashes::<DEPTH>::new();

        let mut filled_subtrees = [ZERO_LEAF; DEPTH];
        for (level, slot) in filled_subtrees.iter_mut().enumerate() {
            *slot = zeros.empty_sibling(level);
        }

        Self {
            next_index: 0,
            current_root: zeros.empty_root(),
            filled_subtrees,
        }
    }

    /// Append `leaf` and return the new root.
    ///
    /// # Errors
    /// * `PoolFull` if every leaf slot is used; the tree is left untouched
    pub fn insert(&mut self, leaf: [u8; 32]) -> std::result::Result<[u8; 32], PoolError> {
        self.insert_with(leaf, &ZeroHashes::new())
    }

    /// [`insert`](Self::insert) with caller-provided zero hashes, for bulk
    /// appends.
    pub fn insert_with(
        &mut self,
        leaf: [u8; 32],
        zeros: &ZeroHashes<DEPTH>,
    ) -> std::result::Result<[u8; 32], PoolError> {
        if self.is_full() {
            return Err(PoolError::PoolFull);
        }
        let next_index = self
            .next_index
            .checked_add(1)
            .ok_or(PoolError::ArithmeticOverflow)?;

        let mut current_hash = leaf;
        let mut current_index = self.next_index;

        // Walk up the tree, updating hashes
        for (level, filled) in self.filled_subtrees.iter_mut().enumerate() {
            current_hash = if current_index & 1 == 0 {
                // Left child: becomes the cached subtree, paired with an empty sibling
                *filled = current_hash;
                hash_pair(&current_hash, &zeros.empty_sibling(level))
            } else {
                // Right child: paired with the cached left sibling
                hash_pair(filled, &current_hash)
            };
            current_index >>= 1;
        }

        self.current_root = current_hash;
        self.next_index = next_index;

        Ok(current_hash)
    }

    /// Get the current Merkle root.
    #[inline]
    pub fn root(&self) -> [u8; 32] {
        self.current_root
    }

    /// Index the next insertion will receive.
    #[inline]
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }

    /// Check if tree is full.
    pub fn is_full(&self) -> bool {
        self.next_index >= Self::CAPACITY
    }

    /// True when `leaf_index` has been assigned to an inserted leaf.
    pub fn contains_index(&self, leaf_index: u32) -> bool {
        leaf_index < self.next_index
    }

    pub fn filled_subtrees(&self) -> &[[u8; 32]; DEPTH] {
        &self.filled_subtrees
    }
}

impl<const DEPTH: usize> Default for MerkleAccumulator<DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}

// Hand-written so the accumulator can be embedded in account data for any
// depth: next_index (u32 LE) || current_root || filled_subtrees.
impl<const DEPTH: usize> AnchorSerialize for MerkleAccumulator<DEPTH> {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.next_index.to_le_bytes())?;
        writer.write_all(&self.current_root)?;
        for node in &self.filled_subtrees {
            writer.write_all(node)?;
        }
        Ok(())
    }
}

impl<const DEPTH: usize> AnchorDeserialize for MerkleAccumulator<DEPTH> {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut index_bytes = [0u8; 4];
        reader.read_exact(&mut index_bytes)?;

        let mut current_root = [0u8; 32];
        reader.read_exact(&mut current_root)?;

        let mut filled_subtrees = [ZERO_LEAF; DEPTH];
        for node in filled_subtrees.iter_mut() {
            reader.read_exact(node)?;
        }

        Ok(Self {
            next_index: u32::from_le_bytes(index_bytes),
            current_root,
            filled_subtrees,
        })
    }
}
