//! Per-deposit leaf record
//!
//! Written once by `deposit` so indexers can replay a pool's leaves
//! `0..n` from account data alone.

use anchor_lang::prelude::*;

use crate::constants::LEAF_SEED;

/// Commitment leaf account.
///
/// PDA Seeds: `[b"leaf", pool_id.to_le_bytes().as_ref(), leaf_index.to_le_bytes().as_ref()]`
#[account]
pub struct CommitmentLeaf {
    pub pool_id: u8,
    pub leaf_index: u32,
    pub commitment: [u8; 32],
    /// PDA bump seed
    pub bump: u8,
}

impl CommitmentLeaf {
    pub const LEN: usize = 8 // discriminator
        + 1  // pool_id
        + 4  // leaf_index
        + 32 // commitment
        + 1; // bump

    pub fn initialize(&mut self, pool_id: u8, leaf_index: u32, commitment: [u8; 32], bump: u8) {
        self.pool_id = pool_id;
        self.leaf_index = leaf_index;
        self.commitment = commitment;
        self.bump = bump;
    }

    /// Derive the PDA address for a leaf
    pub fn find_pda(program_id: &Pubkey, pool_id: u8, leaf_index: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                LEAF_SEED,
                pool_id.to_le_bytes().as_ref(),
                leaf_index.to_le_bytes().as_ref(),
            ],
            program_id,
        )
    }
}
