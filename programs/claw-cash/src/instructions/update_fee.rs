//! Update Fee Instruction
//!
//! Only callable by the protocol authority.

use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::error::PoolError;
use crate::events::FeeUpdated;
use crate::state::ProtocolConfig;

#[derive(Accounts)]
pub struct UpdateFee<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ PoolError::Unauthorized,
    )]
    pub config: Account<'info, ProtocolConfig>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<UpdateFee>, new_fee: u64) -> Result<()> {
    let old_fee = ctx.accounts.config.set_fee(new_fee);

    emit!(FeeUpdated {
        authority: ctx.accounts.authority.key(),
        old_fee,
        new_fee,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Fee updated: {} -> {}", old_fee, new_fee);
    Ok(())
}
