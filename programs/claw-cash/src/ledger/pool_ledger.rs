//! Per-denomination pool state
//!
//! A `PoolLedger` is an owned value: the manager clones it, applies a
//! deposit to the clone and swaps the clone in only once the external value
//! movement has succeeded.

use crate::constants::MERKLE_TREE_DEPTH;
use crate::crypto::is_zero_hash;
use crate::error::PoolError;
use crate::merkle::MerkleAccumulator;

use super::PoolId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolLedger<const DEPTH: usize = MERKLE_TREE_DEPTH> {
    pool_id: PoolId,
    denomination: u64,
    tree: MerkleAccumulator<DEPTH>,
}

impl<const DEPTH: usize> PoolLedger<DEPTH> {
    /// Empty pool accepting deposits of exactly `denomination`.
    pub fn new(pool_id: PoolId, denomination: u64) -> Result<Self, PoolError> {
        if denomination == 0 {
            return Err(PoolError::InvalidDenomination);
        }
        Ok(Self {
            pool_id,
            denomination,
            tree: MerkleAccumulator::new(),
        })
    }

    /// Append `commitment`; returns its leaf index.
    ///
    /// # Errors
    /// * `InvalidCommitment` for the all-zero (empty leaf) value
    /// * `PoolFull` once every leaf slot is used
    pub fn deposit(&mut self, commitment: [u8; 32]) -> Result<u32, PoolError> {
        if is_zero_hash(&commitment) {
            return Err(PoolError::InvalidCommitment);
        }
        let leaf_index = self.tree.next_index();
        self.tree.insert(commitment)?;
        Ok(leaf_index)
    }

    pub fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    pub fn denomination(&self) -> u64 {
        self.denomination
    }

    pub fn root(&self) -> [u8; 32] {
        self.tree.root()
    }

    pub fn next_index(&self) -> u32 {
        self.tree.next_index()
    }

    pub fn tree(&self) -> &MerkleAccumulator<DEPTH> {
        &self.tree
    }

    /// `denomination × (deposits − withdrawals)`.
    pub fn expected_balance(&self, withdrawals: u64) -> Result<u64, PoolError> {
        u64::from(self.tree.next_index())
            .checked_sub(withdrawals)
            .and_then(|live| live.checked_mul(self.denomination))
            .ok_or(PoolError::ArithmeticOverflow)
    }
}
