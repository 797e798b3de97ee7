//! Denomination pool state account
//!
//! Each pool owns one depth-20 accumulator. Only `deposit` writes this
//! account; withdrawals read the root and never take a write lock on it.

use anchor_lang::prelude::*;

use crate::constants::{MERKLE_TREE_DEPTH, POOL_SEED};
use crate::error::PoolError;
use crate::merkle::MerkleAccumulator;

/// Pool account.
///
/// PDA Seeds: `[b"pool", pool_id.to_le_bytes().as_ref()]`
#[account]
pub struct Pool {
    /// Pool id (seed of this PDA and of its vault)
    pub pool_id: u8,

    /// Lamports accepted per deposit and paid per withdrawal
    pub denomination: u64,

    /// Commitment accumulator
    pub tree: MerkleAccumulator<MERKLE_TREE_DEPTH>,

    /// PDA bump seed
    pub bump: u8,

    /// SOL vault PDA bump seed
    pub vault_bump: u8,
}

impl Pool {
    /// Account space calculation
    pub const LEN: usize = 8 // discriminator
        + 1  // pool_id
        + 8  // denomination
        + MerkleAccumulator::<MERKLE_TREE_DEPTH>::SERIALIZED_LEN // tree
        + 1  // bump
        + 1; // vault_bump

    /// Initialize an empty pool
    pub fn initialize(
        &mut self,
        pool_id: u8,
        denomination: u64,
        bump: u8,
        vault_bump: u8,
    ) -> Result<()> {
        require!(denomination > 0, PoolError::InvalidDenomination);

        self.pool_id = pool_id;
        self.denomination = denomination;
        self.tree = MerkleAccumulator::new();
        self.bump = bump;
        self.vault_bump = vault_bump;
        Ok(())
    }

    /// Derive the PDA address for a pool
    pub fn find_pda(program_id: &Pubkey, pool_id: u8) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[POOL_SEED, pool_id.to_le_bytes().as_ref()], program_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size_matches_serialization() {
        let mut pool = Pool {
            pool_id: 0,
            denomination: 0,
            tree: MerkleAccumulator::new(),
            bump: 0,
            vault_bump: 0,
        };
        pool.initialize(2, 10_000_000_000, 255, 254).unwrap();
        assert_eq!(pool.try_to_vec().unwrap().len() + 8, Pool::LEN);
        assert!(pool.tree.is_empty());
    }

    #[test]
    fn test_zero_denomination_rejected() {
        let mut pool = Pool {
            pool_id: 0,
            denomination: 0,
            tree: MerkleAccumulator::new(),
            bump: 0,
            vault_bump: 0,
        };
        assert!(pool.initialize(0, 0, 255, 254).is_err());
    }

    #[test]
    fn test_pda_is_per_pool() {
        let program_id = crate::ID;
        let (a, _) = Pool::find_pda(&program_id, 0);
        let (b, _) = Pool::find_pda(&program_id, 1);
        assert_ne!(a, b);
    }
}
