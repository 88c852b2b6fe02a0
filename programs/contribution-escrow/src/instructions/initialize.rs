use anchor_lang::prelude::*;

use crate::constants::ESCROW_SEED;
use crate::events::EscrowInitialized;
use crate::state::{Escrow, EscrowConfig};

#[derive(Accounts)]
#[instruction(escrow_id: u64)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + Escrow::INIT_SPACE,
        seeds = [ESCROW_SEED, owner.key().as_ref(), &escrow_id.to_le_bytes()],
        bump
    )]
    pub escrow: Account<'info, Escrow>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_initialize(ctx: Context<Initialize>, escrow_id: u64, config: EscrowConfig) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let escrow = &mut ctx.accounts.escrow;
    escrow.set_inner(Escrow::open(escrow_id, owner, &config, ctx.bumps.escrow)?);

    msg!(
        "escrow {} open until {} (ceiling {})",
        escrow_id,
        escrow.window.final_time,
        escrow.window.max_time
    );
    emit!(EscrowInitialized {
        escrow: escrow.key(),
        owner,
        recipient: escrow.roles.recipient,
        final_time: escrow.window.final_time,
        max_time: escrow.window.max_time,
    });
    Ok(())
}
