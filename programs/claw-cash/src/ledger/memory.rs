//! In-memory collaborators for the off-chain engine

use std::collections::HashMap;

use anchor_lang::prelude::Pubkey;

use super::PoolId;
use crate::error::PoolError;
use crate::external::{FeeToken, LeafHistoryReader, ValueVault};

/// Fee-token balances keyed by account.
#[derive(Clone, Debug, Default)]
pub struct MemoryFeeToken {
    balances: HashMap<Pubkey, u64>,
    collected: u64,
}

impl MemoryFeeToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faucet: add `amount` to `account`.
    pub fn mint(&mut self, account: Pubkey, amount: u64) {
        let balance = self.balances.entry(account).or_default();
        *balance = balance.saturating_add(amount);
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Total fees taken and not refunded.
    pub fn collected(&self) -> u64 {
        self.collected
    }
}

impl FeeToken for MemoryFeeToken {
    fn debit(&mut self, account: &Pubkey, amount: u64) -> Result<(), PoolError> {
        let balance = self
            .balances
            .get_mut(account)
            .filter(|balance| **balance >= amount)
            .ok_or(PoolError::InsufficientFeeBalance)?;
        let collected = self
            .collected
            .checked_add(amount)
            .ok_or(PoolError::ArithmeticOverflow)?;

        *balance -= amount;
        self.collected = collected;
        Ok(())
    }

    fn refund(&mut self, account: &Pubkey, amount: u64) {
        self.mint(*account, amount);
        self.collected = self.collected.saturating_sub(amount);
    }
}

/// Per-pool vault balances plus a payout log.
#[derive(Clone, Debug, Default)]
pub struct MemoryVault {
    balances: HashMap<PoolId, u64>,
    paid_out: HashMap<Pubkey, u64>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, pool_id: PoolId) -> u64 {
        self.balances.get(&pool_id).copied().unwrap_or_default()
    }

    /// Total paid to `recipient` across all pools.
    pub fn received(&self, recipient: &Pubkey) -> u64 {
        self.paid_out.get(recipient).copied().unwrap_or_default()
    }
}

impl ValueVault for MemoryVault {
    fn credit(&mut self, pool_id: PoolId, amount: u64) -> Result<(), PoolError> {
        let balance = self.balances.entry(pool_id).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(PoolError::ArithmeticOverflow)?;
        Ok(())
    }

    fn debit(&mut self, pool_id: PoolId, amount: u64, recipient: &Pubkey) -> Result<(), PoolError> {
        let balance = self
            .balances
            .get_mut(&pool_id)
            .filter(|balance| **balance >= amount)
            .ok_or(PoolError::InsufficientVaultBalance)?;
        let received = self
            .paid_out
            .get(recipient)
            .copied()
            .unwrap_or_default()
            .checked_add(amount)
            .ok_or(PoolError::ArithmeticOverflow)?;

        *balance -= amount;
        self.paid_out.insert(*recipient, received);
        Ok(())
    }
}

/// Ordered leaf log per pool, fed from deposit results.
#[derive(Clone, Debug, Default)]
pub struct MemoryLeafHistory {
    leaves: HashMap<PoolId, Vec<[u8; 32]>>,
}

impl MemoryLeafHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the leaf a deposit reported.
    ///
    /// # Errors
    /// * `LeafIndexMismatch` if `leaf_index` would leave a gap or overwrite
    pub fn record(
        &mut self,
        pool_id: PoolId,
        leaf_index: u32,
        commitment: [u8; 32],
    ) -> Result<(), PoolError> {
        let leaves = self.leaves.entry(pool_id).or_default();
        if leaves.len() as u64 != u64::from(leaf_index) {
            return Err(PoolError::LeafIndexMismatch);
        }
        leaves.push(commitment);
        Ok(())
    }

    pub fn len(&self, pool_id: PoolId) -> usize {
        self.leaves.get(&pool_id).map_or(0, Vec::len)
    }
}

impl LeafHistoryReader for MemoryLeafHistory {
    fn leaves(&self, pool_id: PoolId) -> Result<Vec<[u8; 32]>, PoolError> {
        Ok(self.leaves.get(&pool_id).cloned().unwrap_or_default())
    }
}
