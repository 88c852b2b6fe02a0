use anchor_lang::prelude::*;

use crate::engine;
use crate::events::{FinalTimeForced, WindowExtended};
use crate::state::Escrow;

#[derive(Accounts)]
pub struct UpdateWindow<'info> {
    #[account(mut)]
    pub escrow: Account<'info, Escrow>,

    pub owner: Signer<'info>,
}

pub fn handle_extend(ctx: Context<UpdateWindow>, extended_time: i64) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    engine::extend(escrow, ctx.accounts.owner.key, extended_time)?;

    msg!("final time extended to {}", escrow.window.final_time);
    emit!(WindowExtended {
        escrow: escrow.key(),
        extended_time,
        final_time: escrow.window.final_time,
    });
    Ok(())
}

/// Pushes the window straight to `final_time`, typically into the past.
pub fn handle_force_close(ctx: Context<UpdateWindow>, final_time: i64) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    engine::force_close(escrow, ctx.accounts.owner.key, final_time)?;

    msg!("final time forced to {}", final_time);
    emit!(FinalTimeForced {
        escrow: escrow.key(),
        final_time,
    });
    Ok(())
}
