//! Membership proofs
//!
//! [`ProofBuilder`] is an offline utility: it replays a pool's full leaf
//! history, materializes every layer, and reads sibling paths out of it.
//! [`verify_proof`] is the pure check run on withdrawal.
//!
//! Once leaf `i` is inserted, its position and every left-hand sibling on
//! its path are final: later appends only fill subtrees to its right.
//! Right-hand siblings start out as empty subtrees and are filled in as the
//! pool grows, so a path is rebuilt from the history that matches the root
//! it is checked against. Pools keep no root history; withdrawals prove
//! against the current root.

use super::zeros::ZeroHashes;
use crate::constants::ZERO_LEAF;
use crate::crypto::hash_pair;
use crate::error::PoolError;
use crate::external::LeafHistoryReader;

/// Sibling path of exactly `DEPTH` hashes, leaf level first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MerkleProof<const DEPTH: usize> {
    siblings: [[u8; 32]; DEPTH],
}

impl<const DEPTH: usize> MerkleProof<DEPTH> {
    pub fn new(siblings: [[u8; 32]; DEPTH]) -> Self {
        Self { siblings }
    }

    /// Validate a variable-length path at the API boundary.
    ///
    /// # Errors
    /// * `InvalidProof` unless `siblings.len() == DEPTH`
    pub fn from_slice(siblings: &[[u8; 32]]) -> Result<Self, PoolError> {
        <[[u8; 32]; DEPTH]>::try_from(siblings)
            .map(Self::new)
            .map_err(|_| PoolError::InvalidProof)
    }

    pub fn siblings(&self) -> &[[u8; 32]; DEPTH] {
        &self.siblings
    }

    pub fn siblings_mut(&mut self) -> &mut [[u8; 32]; DEPTH] {
        &mut self.siblings
    }

    pub fn to_vec(&self) -> Vec<[u8; 32]> {
        self.siblings.to_vec()
    }

    /// Fold `leaf` up the path. Bit `level` of `leaf_index` says whether
    /// the running node is a right child at that level.
    pub fn compute_root(&self, leaf: &[u8; 32], leaf_index: u32) -> [u8; 32] {
        let mut current_hash = *leaf;
        let mut current_index = leaf_index;

        for sibling in &self.siblings {
            current_hash = if current_index & 1 == 0 {
                hash_pair(&current_hash, sibling)
            } else {
                hash_pair(sibling, &current_hash)
            };
            current_index >>= 1;
        }

        current_hash
    }
}

/// Check that `leaf` sits at `leaf_index` in the tree whose root is `root`.
///
/// Pure and stateless. Indices past the tree's capacity are rejected so
/// that high bits cannot alias onto a real position.
pub fn verify_proof<const DEPTH: usize>(
    leaf: &[u8; 32],
    leaf_index: u32,
    proof: &MerkleProof<DEPTH>,
    root: &[u8; 32],
) -> bool {
    if u64::from(leaf_index) >= 1u64 << DEPTH {
        return false;
    }
    proof.compute_root(leaf, leaf_index) == *root
}

/// Offline path reconstruction from a full, ordered leaf history.
#[derive(Clone, Debug)]
pub struct ProofBuilder<const DEPTH: usize> {
    zeros: ZeroHashes<DEPTH>,
    /// `layers[0]` = leaves, `layers[DEPTH]` = `[root]` (empty with no leaves).
    /// Only materialized nodes are stored; absent ones are empty subtrees.
    layers: Vec<Vec<[u8; 32]>>,
}

impl<const DEPTH: usize> ProofBuilder<DEPTH> {
    /// Materialize all layers above `leaves`.
    ///
    /// # Errors
    /// * `PoolFull` if the history holds more leaves than the tree can
    pub fn new(leaves: Vec<[u8; 32]>) -> Result<Self, PoolError> {
        if leaves.len() as u64 > 1u64 << DEPTH {
            return Err(PoolError::PoolFull);
        }

        let zeros = ZeroHashes::<DEPTH>::new();
        let mut layers = Vec::with_capacity(DEPTH + 1);
        let mut current = leaves;

        for level in 0..DEPTH {
            let padding = zeros.empty_sibling(level);
            let parents = current
                .chunks(2)
                .map(|pair| hash_pair(&pair[0], pair.get(1).unwrap_or(&padding)))
                .collect();
            layers.push(current);
            current = parents;
        }
        layers.push(current);

        Ok(Self { zeros, layers })
    }

    /// Replay `pool_id` through `reader` and build from the result.
    pub fn from_history<R>(reader: &R, pool_id: u8) -> Result<Self, PoolError>
    where
        R: LeafHistoryReader + ?Sized,
    {
        Self::new(reader.leaves(pool_id)?)
    }

    /// Root of the full tree over `leaves`, rebuilt from scratch.
    pub fn root_of(leaves: &[[u8; 32]]) -> Result<[u8; 32], PoolError> {
        Ok(Self::new(leaves.to_vec())?.root())
    }

    pub fn leaves(&self) -> &[[u8; 32]] {
        &self.layers[0]
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Root over the replayed history.
    pub fn root(&self) -> [u8; 32] {
        self.layers
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or_else(|| self.zeros.empty_root())
    }

    /// Sibling path for the leaf at `leaf_index`.
    ///
    /// # Errors
    /// * `LeafOutOfRange` if the history has no such leaf
    pub fn prove(&self, leaf_index: u32) -> Result<MerkleProof<DEPTH>, PoolError> {
        let mut position =
            usize::try_from(leaf_index).map_err(|_| PoolError::LeafOutOfRange)?;
        if position >= self.leaf_count() {
            return Err(PoolError::LeafOutOfRange);
        }

        let mut siblings = [ZERO_LEAF; DEPTH];
        for (level, (slot, layer)) in siblings.iter_mut().zip(&self.layers).enumerate() {
            *slot = layer
                .get(position ^ 1)
                .copied()
                .unwrap_or_else(|| self.zeros.empty_sibling(level));
            position >>= 1;
        }

        Ok(MerkleProof::new(siblings))
    }
}
