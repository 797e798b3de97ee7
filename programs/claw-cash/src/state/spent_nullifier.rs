//! Spent Nullifier tracking using per-nullifier PDA pattern
//!
//! Each spent nullifier gets its own account, so the spent check is an
//! O(1) account lookup and the set has no capacity limit.
//!
//! # Anti-Double-Spend Mechanism
//! 1. Withdraw derives the PDA from `(pool_id, nullifier_hash)`
//! 2. The account is created on first use (`init_if_needed`)
//! 3. A record that already holds the hash → `NullifierSpent`
//! 4. Otherwise the record is written in the same transaction as the payout
//!
//! The runtime write-locks the PDA for the whole transaction, so two
//! withdrawals of one note cannot both observe an empty record.

use anchor_lang::prelude::*;

use crate::constants::NULLIFIER_SEED;
use crate::crypto::is_zero_hash;

/// Spent nullifier marker account.
///
/// PDA Seeds: `[b"nullifier", pool_id.to_le_bytes().as_ref(), nullifier_hash.as_ref()]`
#[account]
pub struct SpentNullifier {
    /// Pool the note was withdrawn from
    pub pool_id: u8,

    /// The nullifier hash that was spent.
    /// This is SHA256(nullifier_preimage), NOT the raw preimage
    pub nullifier_hash: [u8; 32],

    /// Unix timestamp when nullifier was spent
    pub spent_at: i64,

    /// Slot number when nullifier was spent (for indexing)
    pub spent_slot: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl SpentNullifier {
    /// Account space (minimal to reduce rent costs)
    pub const LEN: usize = 8 // discriminator
        + 1  // pool_id
        + 32 // nullifier_hash
        + 8  // spent_at
        + 8  // spent_slot
        + 1; // bump

    /// Initialize spent nullifier record
    pub fn initialize(
        &mut self,
        pool_id: u8,
        nullifier_hash: [u8; 32],
        spent_at: i64,
        spent_slot: u64,
        bump: u8,
    ) {
        self.pool_id = pool_id;
        self.nullifier_hash = nullifier_hash;
        self.spent_at = spent_at;
        self.spent_slot = spent_slot;
        self.bump = bump;
    }

    /// True once a withdrawal has written this record. Freshly created
    /// accounts are zero-filled.
    pub fn is_recorded(&self) -> bool {
        !is_zero_hash(&self.nullifier_hash)
    }

    /// Derive the PDA address for a nullifier
    pub fn find_pda(program_id: &Pubkey, pool_id: u8, nullifier_hash: &[u8; 32]) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                NULLIFIER_SEED,
                pool_id.to_le_bytes().as_ref(),
                nullifier_hash.as_ref(),
            ],
            program_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> SpentNullifier {
        SpentNullifier {
            pool_id: 0,
            nullifier_hash: [0u8; 32],
            spent_at: 0,
            spent_slot: 0,
            bump: 0,
        }
    }

    #[test]
    fn test_fresh_record_is_unspent() {
        assert!(!blank().is_recorded());
    }

    #[test]
    fn test_initialized_record_is_spent() {
        let mut record = blank();
        record.initialize(1, [7u8; 32], 1_700_000_000, 42, 255);
        assert!(record.is_recorded());
        assert_eq!(record.try_to_vec().unwrap().len() + 8, SpentNullifier::LEN);
    }

    #[test]
    fn test_pda_is_scoped_to_pool() {
        let hash = [3u8; 32];
        let (a, _) = SpentNullifier::find_pda(&crate::ID, 0, &hash);
        let (b, _) = SpentNullifier::find_pda(&crate::ID, 1, &hash);
        assert_ne!(a, b);
    }
}
