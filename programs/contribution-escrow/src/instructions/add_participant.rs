use anchor_lang::prelude::*;

use crate::constants::PARTICIPANT_SEED;
use crate::engine;
use crate::events::ParticipantWhitelisted;
use crate::state::{Escrow, Participant};

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct AddParticipant<'info> {
    pub escrow: Account<'info, Escrow>,

    #[account(
        init_if_needed,
        payer = manager,
        space = 8 + Participant::INIT_SPACE,
        seeds = [PARTICIPANT_SEED, escrow.key().as_ref(), wallet.as_ref()],
        bump
    )]
    pub participant_record: Account<'info, Participant>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_add_participant(ctx: Context<AddParticipant>, wallet: Pubkey) -> Result<()> {
    let escrow_key = ctx.accounts.escrow.key();
    let added = engine::add_participant(
        &ctx.accounts.escrow,
        ctx.accounts.manager.key,
        wallet,
        &mut ctx.accounts.participant_record,
        escrow_key,
        ctx.bumps.participant_record,
    )?;

    if added {
        msg!("whitelisted participant {}", wallet);
        emit!(ParticipantWhitelisted {
            escrow: escrow_key,
            wallet,
        });
    }
    Ok(())
}
