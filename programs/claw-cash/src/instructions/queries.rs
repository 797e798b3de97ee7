//! Read-only views, answered through return data

use anchor_lang::prelude::*;

use crate::constants::{NULLIFIER_SEED, POOL_SEED};
use crate::state::{Pool, SpentNullifier};

#[derive(Accounts)]
#[instruction(pool_id: u8)]
pub struct GetRoot<'info> {
    #[account(
        seeds = [POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,
}

/// Current root of the pool's tree.
pub fn get_root_handler(ctx: Context<GetRoot>, _pool_id: u8) -> Result<[u8; 32]> {
    Ok(ctx.accounts.pool.tree.root())
}

#[derive(Accounts)]
#[instruction(pool_id: u8, nullifier_hash: [u8; 32])]
pub struct IsSpent<'info> {
    #[account(
        seeds = [POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: may not exist yet; address pinned by seeds, contents checked in the handler
    #[account(
        seeds = [NULLIFIER_SEED, pool_id.to_le_bytes().as_ref(), nullifier_hash.as_ref()],
        bump
    )]
    pub spent_nullifier: UncheckedAccount<'info>,
}

/// Whether `nullifier_hash` has been recorded in the pool.
pub fn is_spent_handler(
    ctx: Context<IsSpent>,
    _pool_id: u8,
    _nullifier_hash: [u8; 32],
) -> Result<bool> {
    let info = ctx.accounts.spent_nullifier.to_account_info();
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(false);
    }

    let data = info.try_borrow_data()?;
    let record = SpentNullifier::try_deserialize(&mut &data[..])?;
    Ok(record.is_recorded())
}
