//! Claw Cash - fixed-denomination SOL pools with unlinkable withdrawals
//!
//! Depositors append `SHA256(secret || nullifier_preimage)` to a pool's
//! depth-20 Merkle tree. A withdrawal reveals the preimages and a sibling
//! path to the current root; the nullifier hash is recorded so each note
//! pays out once.
//!
//! The pure core (`crypto`, `merkle`) is shared by the on-chain program
//! and by the off-chain [`ledger`] engine.

use anchor_lang::prelude::*;

pub mod constants;
pub mod crypto;
pub mod error;
pub mod events;
pub mod external;
pub mod instructions;
pub mod merkle;
pub mod state;

#[cfg(not(target_os = "solana"))]
pub mod ledger;

#[cfg(test)]
mod tests;

use instructions::*;

declare_id!("DpVYsUBZ9f8Lny2xvPUK6E8RWxBA7pBh2XRLHWUu9jHP");

#[program]
pub mod claw_cash {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, fee_amount: u64) -> Result<()> {
        instructions::initialize::handler(ctx, fee_amount)
    }

    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        pool_id: u8,
        denomination: u64,
    ) -> Result<()> {
        instructions::initialize_pool::handler(ctx, pool_id, denomination)
    }

    pub fn deposit(
        ctx: Context<Deposit>,
        commitment: [u8; 32],
        pool_id: u8,
        leaf_index: u32,
    ) -> Result<()> {
        instructions::deposit::handler(ctx, commitment, pool_id, leaf_index)
    }

    pub fn withdraw(
        ctx: Context<Withdraw>,
        secret: [u8; 32],
        nullifier_preimage: [u8; 32],
        nullifier_hash: [u8; 32],
        leaf_index: u32,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::withdraw::handler(
            ctx,
            secret,
            nullifier_preimage,
            nullifier_hash,
            leaf_index,
            proof,
        )
    }

    pub fn update_fee(ctx: Context<UpdateFee>, new_fee: u64) -> Result<()> {
        instructions::update_fee::handler(ctx, new_fee)
    }

    pub fn get_root(ctx: Context<GetRoot>, pool_id: u8) -> Result<[u8; 32]> {
        instructions::queries::get_root_handler(ctx, pool_id)
    }

    pub fn is_spent(
        ctx: Context<IsSpent>,
        pool_id: u8,
        nullifier_hash: [u8; 32],
    ) -> Result<bool> {
        instructions::queries::is_spent_handler(ctx, pool_id, nullifier_hash)
    }
}
