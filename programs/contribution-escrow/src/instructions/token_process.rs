use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{PARTICIPANT_SEED, POSITION_SEED, TOKEN_SEED};
use crate::engine;
use crate::events::TokenReleased;
use crate::state::{Escrow, Participant, TokenConfig, TokenPosition};
use crate::transfer::transfer_as_escrow;

#[derive(Accounts)]
pub struct TokenProcess<'info> {
    pub escrow: Account<'info, Escrow>,

    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [TOKEN_SEED, escrow.key().as_ref(), mint.key().as_ref()],
        bump = token_config.bump
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        mut,
        address = token_config.vault,
    )]
    pub token_vault: Account<'info, TokenAccount>,

    #[account(
        seeds = [PARTICIPANT_SEED, escrow.key().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub participant_record: Option<Account<'info, Participant>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, escrow.key().as_ref(), mint.key().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub position: Option<Account<'info, TokenPosition>>,

    pub participant: Signer<'info>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = escrow.roles.recipient,
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_token_process(ctx: Context<TokenProcess>) -> Result<()> {
    let escrow_key = ctx.accounts.escrow.key();
    let mint = ctx.accounts.mint.key();
    let wallet = ctx.accounts.participant.key();

    let accounts = &mut *ctx.accounts;
    let unlisted = Participant::default();
    let participant = accounts.participant_record.as_deref().unwrap_or(&unlisted);
    let mut empty = TokenPosition::default();
    let position = accounts.position.as_deref_mut().unwrap_or(&mut empty);
    let amount = engine::token_process(
        &accounts.escrow,
        &mut accounts.token_config,
        participant,
        position,
    )?;

    transfer_as_escrow(
        accounts.token_program.to_account_info(),
        accounts.token_vault.to_account_info(),
        accounts.recipient_token_account.to_account_info(),
        accounts.escrow.to_account_info(),
        &accounts.escrow,
        amount,
    )?;

    msg!("released {} {} from {} to recipient", amount, mint, wallet);
    emit!(TokenReleased {
        escrow: escrow_key,
        mint,
        wallet,
        recipient: accounts.recipient_token_account.owner,
        amount,
        raised: accounts.token_config.raised,
    });
    Ok(())
}
