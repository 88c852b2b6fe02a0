use anchor_lang::prelude::*;

use crate::constants::PARTICIPANT_SEED;
use crate::engine;
use crate::events::Released;
use crate::state::{Escrow, Participant};
use crate::transfer::move_lamports;

#[derive(Accounts)]
pub struct Process<'info> {
    #[account(mut)]
    pub escrow: Account<'info, Escrow>,

    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, escrow.key().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub participant_record: Option<Account<'info, Participant>>,

    pub participant: Signer<'info>,

    #[account(mut, address = escrow.roles.recipient)]
    pub recipient: SystemAccount<'info>,
}

pub fn handle_process(ctx: Context<Process>) -> Result<()> {
    let escrow_key = ctx.accounts.escrow.key();
    let wallet = ctx.accounts.participant.key();

    let accounts = &mut *ctx.accounts;
    let mut unlisted = Participant::default();
    let record = accounts
        .participant_record
        .as_deref_mut()
        .unwrap_or(&mut unlisted);
    let amount = engine::process(&mut accounts.escrow, record)?;

    move_lamports(
        &accounts.escrow.to_account_info(),
        &accounts.recipient.to_account_info(),
        amount,
    )?;

    msg!("released {} lamports from {} to recipient", amount, wallet);
    emit!(Released {
        escrow: escrow_key,
        wallet,
        recipient: accounts.recipient.key(),
        amount,
        total_raised: accounts.escrow.total_raised,
    });
    Ok(())
}
