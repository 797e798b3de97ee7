//! Withdraw Instruction
//!
//! Spends a note by revealing its secrets and a Merkle path to the pool's
//! current root, then pays one denomination from the vault.
//!
//! # Verification Flow
//! 1. Validate the path length at the boundary
//! 2. Check `nullifier_hash == SHA256(nullifier_preimage)`
//! 3. Check the leaf index has been assigned
//! 4. Recompute the commitment and fold it up the path to the current root
//! 5. Reject if the nullifier record is already populated
//! 6. Write the record and pay the recipient from the vault PDA
//!
//! The pool account is read-only here, so withdrawals never contend with
//! deposits for its write lock.

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{MERKLE_TREE_DEPTH, NULLIFIER_SEED, POOL_SEED, VAULT_SEED};
use crate::crypto::{compute_commitment, compute_nullifier};
use crate::error::PoolError;
use crate::events::WithdrawEvent;
use crate::merkle::{verify_proof, MerkleAccumulator, MerkleProof};
use crate::state::{Pool, SpentNullifier};

/// Accounts for withdraw instruction.
#[derive(Accounts)]
#[instruction(secret: [u8; 32], nullifier_preimage: [u8; 32], nullifier_hash: [u8; 32])]
pub struct Withdraw<'info> {
    #[account(
        seeds = [POOL_SEED, pool.pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.pool_id.to_le_bytes().as_ref()],
        bump = pool.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    /// Created on first spend. A populated record means the note is gone.
    #[account(
        init_if_needed,
        payer = payer,
        space = SpentNullifier::LEN,
        seeds = [NULLIFIER_SEED, pool.pool_id.to_le_bytes().as_ref(), nullifier_hash.as_ref()],
        bump
    )]
    pub spent_nullifier: Account<'info, SpentNullifier>,

    /// CHECK: any account may receive SOL; the recipient is not tied to the depositor
    #[account(mut)]
    pub recipient: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Steps 1 to 5 of the verification flow. `record` is the nullifier PDA as
/// loaded; `init_if_needed` hands over a zero-filled record on first spend.
pub fn check_withdrawal<const DEPTH: usize>(
    tree: &MerkleAccumulator<DEPTH>,
    record: &SpentNullifier,
    secret: &[u8; 32],
    nullifier_preimage: &[u8; 32],
    nullifier_hash: &[u8; 32],
    leaf_index: u32,
    proof: &[[u8; 32]],
) -> Result<()> {
    let proof = MerkleProof::<DEPTH>::from_slice(proof)?;

    require!(
        compute_nullifier(nullifier_preimage) == *nullifier_hash,
        PoolError::InvalidProof
    );
    require!(tree.contains_index(leaf_index), PoolError::LeafOutOfRange);

    // ========== MEMBERSHIP PROOF ==========

    let commitment = compute_commitment(secret, nullifier_preimage);
    require!(
        verify_proof(&commitment, leaf_index, &proof, &tree.root()),
        PoolError::InvalidProof
    );

    // ========== DOUBLE-SPEND CHECK ==========

    require!(!record.is_recorded(), PoolError::NullifierSpent);
    Ok(())
}

/// Handler for withdraw instruction.
///
/// # Arguments
/// * `secret` - Note secret (blinds the commitment)
/// * `nullifier_preimage` - Note nullifier preimage
/// * `nullifier_hash` - `SHA256(nullifier_preimage)`, recorded as spent
/// * `leaf_index` - Position of the note's commitment
/// * `proof` - Sibling path, exactly `MERKLE_TREE_DEPTH` hashes, leaf level first
pub fn handler(
    ctx: Context<Withdraw>,
    secret: [u8; 32],
    nullifier_preimage: [u8; 32],
    nullifier_hash: [u8; 32],
    leaf_index: u32,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let pool = &ctx.accounts.pool;

    // ========== VALIDATION CHECKS ==========

    check_withdrawal::<MERKLE_TREE_DEPTH>(
        &pool.tree,
        &ctx.accounts.spent_nullifier,
        &secret,
        &nullifier_preimage,
        &nullifier_hash,
        leaf_index,
        &proof,
    )?;

    let denomination = pool.denomination;
    require!(
        ctx.accounts.vault.to_account_info().lamports() >= denomination,
        PoolError::InsufficientVaultBalance
    );

    // ========== STATE UPDATES ==========

    let clock = Clock::get()?;
    ctx.accounts.spent_nullifier.initialize(
        pool.pool_id,
        nullifier_hash,
        clock.unix_timestamp,
        clock.slot,
        ctx.bumps.spent_nullifier,
    );

    let pool_id_bytes = pool.pool_id.to_le_bytes();
    let vault_bump = [pool.vault_bump];
    let vault_seeds: &[&[u8]] = &[VAULT_SEED, &pool_id_bytes, &vault_bump];

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.recipient.to_account_info(),
            },
            &[vault_seeds],
        ),
        denomination,
    )?;

    emit!(WithdrawEvent {
        pool_id: pool.pool_id,
        nullifier_hash,
        recipient: ctx.accounts.recipient.key(),
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Withdrawn {} lamports from pool {} to {}",
        denomination,
        pool.pool_id,
        ctx.accounts.recipient.key()
    );

    Ok(())
}
