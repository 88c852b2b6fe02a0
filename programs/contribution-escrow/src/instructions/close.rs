use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::engine;
use crate::events::EscrowClosed;
use crate::state::Escrow;
use crate::transfer::{move_lamports, surplus_lamports, sweep_targets, transfer_as_escrow};

/// Same remaining-account layout as `ReclaimTokens`.
#[derive(Accounts)]
pub struct CloseEscrow<'info> {
    #[account(mut)]
    pub escrow: Account<'info, Escrow>,

    pub caller: Signer<'info>,

    #[account(mut, address = escrow.roles.recipient)]
    pub recipient: SystemAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_close<'info>(ctx: Context<'_, '_, '_, 'info, CloseEscrow<'info>>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let escrow_key = ctx.accounts.escrow.key();
    engine::close(&mut ctx.accounts.escrow, ctx.accounts.caller.key, now)?;

    let escrow = &ctx.accounts.escrow;
    let targets = sweep_targets(ctx.remaining_accounts, &escrow_key, &escrow.roles.recipient)?;
    let mints = targets.len() as u32;
    for target in targets {
        if target.vault_amount == 0 {
            continue;
        }
        transfer_as_escrow(
            ctx.accounts.token_program.to_account_info(),
            target.vault,
            target.destination,
            escrow.to_account_info(),
            escrow,
            target.vault_amount,
        )?;
        msg!("swept {} {} on close", target.vault_amount, target.config.mint);
    }

    let escrow_info = escrow.to_account_info();
    let lamports = surplus_lamports(&escrow_info, &Rent::get()?);
    if lamports > 0 {
        move_lamports(&escrow_info, &ctx.accounts.recipient.to_account_info(), lamports)?;
    }

    msg!("escrow {} closed", escrow.escrow_id);
    emit!(EscrowClosed {
        escrow: escrow_key,
        lamports,
        mints,
    });
    Ok(())
}
