use anchor_lang::prelude::*;

use crate::error::EscrowError;

/// Which side of `final_time` a call lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    BeforeFinal,
    PastFinal,
}

/// Contribution window. `final_time` is stored rather than derived so the
/// owner can force it with `force_close`; `extend` always recomputes it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct TimeWindow {
    pub deadline: i64,
    pub extended_time: i64,
    pub max_time: i64,
    pub final_time: i64,
}

impl TimeWindow {
    pub fn new(deadline: i64, extended_time: i64, max_time: i64) -> Result<Self> {
        let final_time = Self::checked_final(deadline, extended_time, max_time)?;
        Ok(Self {
            deadline,
            extended_time,
            max_time,
            final_time,
        })
    }

    pub fn is_before_final(&self, now: i64) -> bool {
        now <= self.final_time
    }

    pub fn phase(&self, now: i64) -> Phase {
        if self.is_before_final(now) {
            Phase::BeforeFinal
        } else {
            Phase::PastFinal
        }
    }

    pub fn extend(&mut self, extended_time: i64) -> Result<()> {
        self.final_time = Self::checked_final(self.deadline, extended_time, self.max_time)?;
        self.extended_time = extended_time;
        Ok(())
    }

    pub fn force_final_time(&mut self, final_time: i64) -> Result<()> {
        require!(final_time <= self.max_time, EscrowError::WindowOverflow);
        self.final_time = final_time;
        Ok(())
    }

    fn checked_final(deadline: i64, extended_time: i64, max_time: i64) -> Result<i64> {
        require!(extended_time >= 0, EscrowError::InvalidWindow);
        let final_time = deadline
            .checked_add(extended_time)
            .ok_or(EscrowError::WindowOverflow)?;
        require!(final_time <= max_time, EscrowError::WindowOverflow);
        Ok(final_time)
    }
}
