//! Event definitions for Claw Cash pools
//!
//! Events are emitted for off-chain indexing and client synchronization.
//! Clients MUST index `DepositEvent` to replay a pool's leaf history
//! before building a withdrawal proof.

use anchor_lang::prelude::*;

/// Emitted once when the protocol config is created.
#[event]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub fee_mint: Pubkey,
    pub fee_amount: u64,
    pub timestamp: i64,
}

/// Emitted when a denomination pool is initialized.
#[event]
pub struct PoolInitialized {
    /// Pool id (seed of the pool PDA)
    pub pool_id: u8,
    /// Lamports accepted per deposit
    pub denomination: u64,
    /// Root of the empty tree
    pub merkle_root: [u8; 32],
    /// Unix timestamp
    pub timestamp: i64,
}

/// Emitted when a commitment is inserted into a pool.
///
/// CRITICAL: Clients must index this event to:
/// 1. Track their leaf_index for proof generation
/// 2. Reconstruct the Merkle tree for path computation
#[event]
pub struct DepositEvent {
    pub pool_id: u8,
    /// Commitment inserted into Merkle tree
    pub commitment: [u8; 32],
    /// Index of this leaf in the tree (0-indexed)
    pub leaf_index: u32,
    /// New Merkle root after insertion
    pub merkle_root: [u8; 32],
    pub timestamp: i64,
}

/// Emitted when a note is withdrawn.
#[event]
pub struct WithdrawEvent {
    pub pool_id: u8,
    /// Recorded nullifier hash
    pub nullifier_hash: [u8; 32],
    pub recipient: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the authority changes the deposit fee.
#[event]
pub struct FeeUpdated {
    pub authority: Pubkey,
    pub old_fee: u64,
    pub new_fee: u64,
    pub timestamp: i64,
}
