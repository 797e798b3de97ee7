//! Collaborators at the pool boundary
//!
//! Value movement, fee collection and leaf replay live outside the pool
//! core. On-chain they are the system program, the SPL token program and
//! `DepositEvent`/`CommitmentLeaf` indexing; off-chain they are these
//! traits.

use anchor_lang::prelude::Pubkey;

use crate::error::PoolError;

/// Fee-token ledger debited on every deposit.
///
/// Where the debited tokens end up (burn, treasury) is deployment policy.
pub trait FeeToken {
    /// Take `amount` from `account`.
    fn debit(&mut self, account: &Pubkey, amount: u64) -> Result<(), PoolError>;

    /// Give back a debit whose deposit was aborted.
    fn refund(&mut self, account: &Pubkey, amount: u64);
}

/// Holds the value backing a pool's unspent notes.
pub trait ValueVault {
    /// Add `amount` to the pool's balance on deposit.
    fn credit(&mut self, pool_id: u8, amount: u64) -> Result<(), PoolError>;

    /// Pay `amount` from the pool's balance to `recipient` on withdrawal.
    fn debit(&mut self, pool_id: u8, amount: u64, recipient: &Pubkey) -> Result<(), PoolError>;
}

/// Replays a pool's leaves `0..n` in insertion order.
pub trait LeafHistoryReader {
    fn leaves(&self, pool_id: u8) -> Result<Vec<[u8; 32]>, PoolError>;
}
