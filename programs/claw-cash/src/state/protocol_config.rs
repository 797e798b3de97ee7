//! Protocol configuration state account
//!
//! One per deployment. Holds the authority, the fee-token mint and the
//! per-deposit fee.

use anchor_lang::prelude::*;

/// Protocol configuration account.
///
/// PDA Seeds: `[b"config"]`
#[account]
pub struct ProtocolConfig {
    /// Protocol authority - can create pools and change the fee
    pub authority: Pubkey,

    /// SPL mint of the fee token
    pub fee_mint: Pubkey,

    /// Fee-token units debited per deposit (0 disables the fee)
    pub fee_amount: u64,

    /// Treasury token account PDA receiving fees
    pub treasury: Pubkey,

    /// PDA bump seed
    pub bump: u8,

    /// Treasury PDA bump seed
    pub treasury_bump: u8,
}

impl ProtocolConfig {
    /// Account space calculation
    pub const LEN: usize = 8 // discriminator
        + 32 // authority
        + 32 // fee_mint
        + 8  // fee_amount
        + 32 // treasury
        + 1  // bump
        + 1; // treasury_bump

    /// Initialize protocol configuration
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        fee_mint: Pubkey,
        fee_amount: u64,
        treasury: Pubkey,
        bump: u8,
        treasury_bump: u8,
    ) {
        self.authority = authority;
        self.fee_mint = fee_mint;
        self.fee_amount = fee_amount;
        self.treasury = treasury;
        self.bump = bump;
        self.treasury_bump = treasury_bump;
    }

    /// Replace the deposit fee, returning the previous one.
    pub fn set_fee(&mut self, new_fee: u64) -> u64 {
        core::mem::replace(&mut self.fee_amount, new_fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_config_size() {
        let mut config = ProtocolConfig {
            authority: Pubkey::new_unique(),
            fee_mint: Pubkey::new_unique(),
            fee_amount: 0,
            treasury: Pubkey::new_unique(),
            bump: 0,
            treasury_bump: 0,
        };
        config.initialize(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            5,
            Pubkey::new_unique(),
            254,
            253,
        );
        assert_eq!(config.try_to_vec().unwrap().len() + 8, ProtocolConfig::LEN);
    }

    #[test]
    fn test_set_fee_returns_previous() {
        let mut config = ProtocolConfig {
            authority: Pubkey::default(),
            fee_mint: Pubkey::default(),
            fee_amount: 100,
            treasury: Pubkey::default(),
            bump: 0,
            treasury_bump: 0,
        };
        assert_eq!(config.set_fee(250), 100);
        assert_eq!(config.fee_amount, 250);
    }
}
