use anchor_lang::prelude::*;

use crate::error::EscrowError;

/// Per-participant record: whitelist membership, release authorization and
/// the pending native balance. Created by whichever of `add_participant` or
/// `authorize` touches the wallet first.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct Participant {
    pub escrow: Pubkey,
    pub wallet: Pubkey,
    pub whitelisted: bool,
    pub authorized: bool,
    pub balance: u64,
    pub bump: u8,
}

impl Participant {
    /// Fills in identity fields of a freshly created record; no-op otherwise.
    pub fn bind(&mut self, escrow: Pubkey, wallet: Pubkey, bump: u8) {
        if self.wallet == Pubkey::default() {
            self.escrow = escrow;
            self.wallet = wallet;
            self.bump = bump;
        }
    }

    pub fn require_whitelisted(&self) -> Result<()> {
        require!(self.whitelisted, EscrowError::NotWhitelisted);
        Ok(())
    }

    pub fn require_authorized(&self) -> Result<()> {
        require!(self.authorized, EscrowError::NotAuthorized);
        Ok(())
    }
}
