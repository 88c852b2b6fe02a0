use anchor_lang::prelude::*;

use crate::constants::ESCROW_SEED;
use crate::error::EscrowError;

use super::roles::{Role, Roles};
use super::window::{Phase, TimeWindow};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum EscrowStatus {
    Open,
    Closed,
}

/// Construction parameters passed to `initialize`. The owner is the signer.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct EscrowConfig {
    pub manager: Pubkey,
    pub recipient: Pubkey,
    /// Set to the owner for the single-role variant.
    pub recipient_container: Pubkey,
    pub deadline: i64,
    pub extended_time: i64,
    pub max_time: i64,
}

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Escrow {
    pub escrow_id: u64,
    pub roles: Roles,
    pub window: TimeWindow,
    /// Sum of every participant's pending native balance.
    pub total_raised: u64,
    pub status: EscrowStatus,
    pub bump: u8,
}

impl Escrow {
    pub fn open(escrow_id: u64, owner: Pubkey, config: &EscrowConfig, bump: u8) -> Result<Self> {
        let roles = Roles::new(
            owner,
            config.manager,
            config.recipient,
            config.recipient_container,
        )?;
        let window = TimeWindow::new(config.deadline, config.extended_time, config.max_time)?;
        Ok(Self {
            escrow_id,
            roles,
            window,
            total_raised: 0,
            status: EscrowStatus::Open,
            bump,
        })
    }

    pub fn ensure_open(&self) -> Result<()> {
        require!(self.status == EscrowStatus::Open, EscrowError::Closed);
        Ok(())
    }

    pub fn require_role(&self, caller: &Pubkey, role: Role) -> Result<()> {
        self.roles.require_role(caller, role)
    }

    pub fn phase(&self, now: i64) -> Phase {
        self.window.phase(now)
    }

    pub fn require_past_final(&self, now: i64) -> Result<()> {
        require!(
            self.phase(now) == Phase::PastFinal,
            EscrowError::DeadlineNotPassed
        );
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.status == EscrowStatus::Closed
    }
}

/// Owned copy of the escrow PDA seeds, kept alive for CPI signing.
pub struct EscrowSigner {
    owner: Pubkey,
    escrow_id: [u8; 8],
    bump: [u8; 1],
}

impl EscrowSigner {
    pub fn new(escrow: &Escrow) -> Self {
        Self {
            owner: escrow.roles.owner,
            escrow_id: escrow.escrow_id.to_le_bytes(),
            bump: [escrow.bump],
        }
    }

    pub fn seeds(&self) -> [&[u8]; 4] {
        [ESCROW_SEED, self.owner.as_ref(), &self.escrow_id, &self.bump]
    }
}
