//! Initialize Protocol Instruction

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{CONFIG_SEED, TREASURY_SEED};
use crate::events::ProtocolInitialized;
use crate::state::ProtocolConfig;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = authority,
        space = ProtocolConfig::LEN,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, ProtocolConfig>,

    pub fee_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = authority,
        token::mint = fee_mint,
        token::authority = config,
        seeds = [TREASURY_SEED],
        bump
    )]
    pub treasury: Account<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Initialize>, fee_amount: u64) -> Result<()> {
    let config = &mut ctx.accounts.config;

    config.initialize(
        ctx.accounts.authority.key(),
        ctx.accounts.fee_mint.key(),
        fee_amount,
        ctx.accounts.treasury.key(),
        ctx.bumps.config,
        ctx.bumps.treasury,
    );

    emit!(ProtocolInitialized {
        authority: ctx.accounts.authority.key(),
        fee_mint: ctx.accounts.fee_mint.key(),
        fee_amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Claw Cash initialized. Fee: {}", fee_amount);
    Ok(())
}
