//! Initialize Pool Instruction

use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, POOL_SEED, VAULT_SEED};
use crate::error::PoolError;
use crate::events::PoolInitialized;
use crate::state::{Pool, ProtocolConfig};

#[derive(Accounts)]
#[instruction(pool_id: u8, denomination: u64)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = authority,
        space = Pool::LEN,
        seeds = [POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// SOL vault, a system-owned PDA that only this program can sign for.
    #[account(
        mut,
        seeds = [VAULT_SEED, pool_id.to_le_bytes().as_ref()],
        bump
    )]
    pub vault: SystemAccount<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ PoolError::Unauthorized,
    )]
    pub config: Account<'info, ProtocolConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializePool>, pool_id: u8, denomination: u64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;

    pool.initialize(pool_id, denomination, ctx.bumps.pool, ctx.bumps.vault)?;

    emit!(PoolInitialized {
        pool_id,
        denomination,
        merkle_root: pool.tree.root(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Pool {} initialized: {} lamports", pool_id, denomination);
    Ok(())
}
