use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use crate::engine;
use crate::events::TokensReclaimed;
use crate::state::Escrow;
use crate::transfer::{sweep_targets, transfer_as_escrow};

/// Listed mints travel as remaining accounts, three per mint:
/// `token_config`, `token_vault`, `recipient_token_account`.
#[derive(Accounts)]
pub struct ReclaimTokens<'info> {
    pub escrow: Account<'info, Escrow>,

    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_reclaim_tokens<'info>(
    ctx: Context<'_, '_, '_, 'info, ReclaimTokens<'info>>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let escrow = &ctx.accounts.escrow;
    engine::begin_sweep(escrow, ctx.accounts.caller.key, now)?;

    let escrow_key = escrow.key();
    let targets = sweep_targets(ctx.remaining_accounts, &escrow_key, &escrow.roles.recipient)?;
    for target in targets {
        let amount = target.config.untracked(target.vault_amount);
        if amount == 0 {
            continue;
        }
        transfer_as_escrow(
            ctx.accounts.token_program.to_account_info(),
            target.vault,
            target.destination,
            escrow.to_account_info(),
            escrow,
            amount,
        )?;

        msg!("reclaimed {} untracked {}", amount, target.config.mint);
        emit!(TokensReclaimed {
            escrow: escrow_key,
            mint: target.config.mint,
            amount,
        });
    }
    Ok(())
}
