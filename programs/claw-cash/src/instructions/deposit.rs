//! Deposit Instruction
//!
//! Moves one denomination of SOL into the pool's vault, collects the
//! fee token and appends the commitment to the pool's tree.
//!
//! # Commitment Model
//! The commitment is computed OFF-CHAIN by the depositor:
//! ```text
//! commitment = SHA256(secret || nullifier_preimage)
//! ```
//! Neither secret reaches the chain until withdrawal.
//!
//! # User Responsibility
//! Users MUST save `(secret, nullifier_preimage, pool_id, leaf_index)`.
//! Lost notes = lost funds.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{CONFIG_SEED, LEAF_SEED, POOL_SEED, TREASURY_SEED, VAULT_SEED};
use crate::crypto::is_zero_hash;
use crate::error::PoolError;
use crate::events::DepositEvent;
use crate::merkle::MerkleAccumulator;
use crate::state::{CommitmentLeaf, Pool, ProtocolConfig};

/// Accounts for deposit instruction.
#[derive(Accounts)]
#[instruction(commitment: [u8; 32], pool_id: u8, leaf_index: u32)]
pub struct Deposit<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
        constraint = pool.pool_id == pool_id @ PoolError::PoolUnknown,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    /// Leaf record. Its seeds pin the caller's expected index, so two
    /// racing deposits cannot both claim one slot.
    #[account(
        init,
        payer = depositor,
        space = CommitmentLeaf::LEN,
        seeds = [LEAF_SEED, pool_id.to_le_bytes().as_ref(), leaf_index.to_le_bytes().as_ref()],
        bump
    )]
    pub commitment_leaf: Account<'info, CommitmentLeaf>,

    /// Depositor's fee-token account.
    #[account(
        mut,
        constraint = depositor_fee_account.mint == config.fee_mint @ PoolError::InvalidMint,
        constraint = depositor_fee_account.owner == depositor.key() @ PoolError::InvalidOwner,
    )]
    pub depositor_fee_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = config.treasury_bump,
    )]
    pub treasury: Account<'info, TokenAccount>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

/// Checks run before any value moves. `leaf_index` must be the tree's next
/// free slot, so a caller racing another deposit fails instead of writing a
/// leaf record at the wrong index.
pub fn validate_deposit<const DEPTH: usize>(
    tree: &MerkleAccumulator<DEPTH>,
    commitment: &[u8; 32],
    leaf_index: u32,
) -> Result<()> {
    require!(!is_zero_hash(commitment), PoolError::InvalidCommitment);
    require!(!tree.is_full(), PoolError::PoolFull);
    require!(
        leaf_index == tree.next_index(),
        PoolError::LeafIndexMismatch
    );
    Ok(())
}

/// Handler for deposit instruction.
///
/// # Arguments
/// * `commitment` - Pre-computed commitment (32 bytes, non-zero)
/// * `pool_id` - Target pool
/// * `leaf_index` - Index the caller expects to receive (= `pool.tree.next_index()`)
pub fn handler(
    ctx: Context<Deposit>,
    commitment: [u8; 32],
    pool_id: u8,
    leaf_index: u32,
) -> Result<()> {
    // ========== VALIDATION ==========

    validate_deposit(&ctx.accounts.pool.tree, &commitment, leaf_index)?;

    // ========== FEE ==========

    let fee = ctx.accounts.config.fee_amount;
    if fee > 0 {
        require!(
            ctx.accounts.depositor_fee_account.amount >= fee,
            PoolError::InsufficientFeeBalance
        );
        let cpi_accounts = Transfer {
            from: ctx.accounts.depositor_fee_account.to_account_info(),
            to: ctx.accounts.treasury.to_account_info(),
            authority: ctx.accounts.depositor.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
        token::transfer(cpi_ctx, fee)?;
    }

    // ========== VALUE TRANSFER ==========

    let denomination = ctx.accounts.pool.denomination;
    let cpi_ctx = CpiContext::new(
        ctx.accounts.system_program.to_account_info(),
        system_program::Transfer {
            from: ctx.accounts.depositor.to_account_info(),
            to: ctx.accounts.vault.to_account_info(),
        },
    );
    system_program::transfer(cpi_ctx, denomination)?;

    // ========== MERKLE TREE UPDATE ==========

    let pool = &mut ctx.accounts.pool;
    let new_root = pool.tree.insert(commitment)?;

    ctx.accounts.commitment_leaf.initialize(
        pool_id,
        leaf_index,
        commitment,
        ctx.bumps.commitment_leaf,
    );

    // ========== EVENT EMISSION ==========

    emit!(DepositEvent {
        pool_id,
        commitment,
        leaf_index,
        merkle_root: new_root,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Deposit successful");
    msg!("Pool: {}, leaf index: {}", pool_id, leaf_index);
    msg!("Commitment: {:?}", &commitment[..8]); // Only log first 8 bytes for privacy

    Ok(())
}
