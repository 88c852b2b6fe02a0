use anchor_lang::prelude::*;

use crate::error::EscrowError;

/// Token whitelist entry for one mint, plus the tracked aggregate of every
/// position in that mint.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct TokenConfig {
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub whitelisted: bool,
    pub raised: u64,
    pub bump: u8,
}

impl TokenConfig {
    pub fn require_whitelisted(&self) -> Result<()> {
        require!(self.whitelisted, EscrowError::NotWhitelisted);
        Ok(())
    }

    /// Vault balance the ledger does not account for.
    pub fn untracked(&self, vault_amount: u64) -> u64 {
        vault_amount.saturating_sub(self.raised)
    }
}

/// Pending balance of one participant in one mint.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct TokenPosition {
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub wallet: Pubkey,
    pub balance: u64,
    pub bump: u8,
}

impl TokenPosition {
    pub fn bind(&mut self, escrow: Pubkey, mint: Pubkey, wallet: Pubkey, bump: u8) {
        if self.wallet == Pubkey::default() {
            self.escrow = escrow;
            self.mint = mint;
            self.wallet = wallet;
            self.bump = bump;
        }
    }
}
