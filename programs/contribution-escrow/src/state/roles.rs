use anchor_lang::prelude::*;

use crate::error::EscrowError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Owner,
    Manager,
    /// Owner or recipient container; gates `reclaim_tokens` and `close`.
    Sweeper,
}

/// Fixed role identities, assigned once at `initialize`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Roles {
    pub owner: Pubkey,
    pub manager: Pubkey,
    pub recipient: Pubkey,
    pub recipient_container: Pubkey,
}

impl Roles {
    pub fn new(
        owner: Pubkey,
        manager: Pubkey,
        recipient: Pubkey,
        recipient_container: Pubkey,
    ) -> Result<Self> {
        for key in [owner, manager, recipient, recipient_container] {
            require_non_zero(&key)?;
        }
        Ok(Self {
            owner,
            manager,
            recipient,
            recipient_container,
        })
    }

    pub fn holds(&self, caller: &Pubkey, role: Role) -> bool {
        match role {
            Role::Owner => *caller == self.owner,
            Role::Manager => *caller == self.manager,
            Role::Sweeper => *caller == self.owner || *caller == self.recipient_container,
        }
    }

    pub fn require_role(&self, caller: &Pubkey, role: Role) -> Result<()> {
        require!(self.holds(caller, role), EscrowError::Unauthorized);
        Ok(())
    }
}

pub fn require_non_zero(key: &Pubkey) -> Result<()> {
    require_keys_neq!(*key, Pubkey::default(), EscrowError::ZeroAddress);
    Ok(())
}
