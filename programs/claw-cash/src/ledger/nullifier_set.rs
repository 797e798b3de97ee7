//! Spent nullifier tracking for one pool
//!
//! Off-chain counterpart of the `SpentNullifier` PDA: presence = spent.
//! `insert` is the unique-insert primitive the double-spend check is built
//! on; callers hold the set's lock across check and record.

use std::collections::HashSet;

#[derive(Clone, Debug, Default)]
pub struct NullifierSet {
    spent: HashSet<[u8; 32]>,
}

impl NullifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, nullifier_hash: &[u8; 32]) -> bool {
        self.spent.contains(nullifier_hash)
    }

    /// Record `nullifier_hash`. Returns `false` if it was already spent.
    pub fn insert(&mut self, nullifier_hash: [u8; 32]) -> bool {
        self.spent.insert(nullifier_hash)
    }

    /// Undo a record whose withdrawal failed to pay out.
    pub(crate) fn remove(&mut self, nullifier_hash: &[u8; 32]) -> bool {
        self.spent.remove(nullifier_hash)
    }

    /// Number of successful withdrawals.
    pub fn len(&self) -> usize {
        self.spent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spent.is_empty()
    }
}
