use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{TOKEN_SEED, TOKEN_VAULT_SEED};
use crate::engine;
use crate::events::TokenWhitelisted;
use crate::state::{Escrow, TokenConfig};

#[derive(Accounts)]
pub struct AddToken<'info> {
    pub escrow: Account<'info, Escrow>,

    pub mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = manager,
        space = 8 + TokenConfig::INIT_SPACE,
        seeds = [TOKEN_SEED, escrow.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub token_config: Account<'info, TokenConfig>,

    #[account(
        init_if_needed,
        payer = manager,
        seeds = [TOKEN_VAULT_SEED, escrow.key().as_ref(), mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = escrow,
    )]
    pub token_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub token_program: Program<'info, Token>,

    pub system_program: Program<'info, System>,
}

pub fn handle_add_token(ctx: Context<AddToken>) -> Result<()> {
    let escrow_key = ctx.accounts.escrow.key();
    let mint = ctx.accounts.mint.key();
    let vault = ctx.accounts.token_vault.key();

    engine::add_token(
        &ctx.accounts.escrow,
        ctx.accounts.manager.key,
        mint,
        vault,
        &mut ctx.accounts.token_config,
        escrow_key,
        ctx.bumps.token_config,
    )?;

    msg!("whitelisted mint {} with vault {}", mint, vault);
    emit!(TokenWhitelisted {
        escrow: escrow_key,
        mint,
        vault,
    });
    Ok(())
}
