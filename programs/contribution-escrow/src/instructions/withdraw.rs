use anchor_lang::prelude::*;

use crate::constants::PARTICIPANT_SEED;
use crate::engine;
use crate::events::Withdrawn;
use crate::state::{Escrow, Participant};
use crate::transfer::move_lamports;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub escrow: Account<'info, Escrow>,

    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, escrow.key().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub participant_record: Option<Account<'info, Participant>>,

    #[account(mut)]
    pub participant: Signer<'info>,
}

pub fn handle_withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let escrow_key = ctx.accounts.escrow.key();
    let wallet = ctx.accounts.participant.key();

    let accounts = &mut *ctx.accounts;
    let mut unlisted = Participant::default();
    let record = accounts
        .participant_record
        .as_deref_mut()
        .unwrap_or(&mut unlisted);
    let amount = engine::withdraw(&mut accounts.escrow, record)?;

    move_lamports(
        &accounts.escrow.to_account_info(),
        &accounts.participant.to_account_info(),
        amount,
    )?;

    msg!("refunded {} lamports to {}", amount, wallet);
    emit!(Withdrawn {
        escrow: escrow_key,
        wallet,
        amount,
        total_raised: accounts.escrow.total_raised,
    });
    Ok(())
}
