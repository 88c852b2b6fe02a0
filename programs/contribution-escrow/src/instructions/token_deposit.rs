use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{PARTICIPANT_SEED, POSITION_SEED, TOKEN_SEED, TOKEN_VAULT_SEED};
use crate::engine::{self, TokenDeposit as Outcome};
use crate::error::EscrowError;
use crate::events::{TokenDeposited, TokenSwept};
use crate::state::{Escrow, Participant, TokenConfig, TokenPosition};
use crate::transfer::{allowance_for, transfer_as_escrow};

#[derive(Accounts)]
pub struct TokenDeposit<'info> {
    pub escrow: Account<'info, Escrow>,

    pub mint: Account<'info, Mint>,

    /// Absent when the mint was never whitelisted.
    #[account(
        mut,
        seeds = [TOKEN_SEED, escrow.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub token_config: Option<Account<'info, TokenConfig>>,

    #[account(
        mut,
        seeds = [TOKEN_VAULT_SEED, escrow.key().as_ref(), mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = escrow,
    )]
    pub token_vault: Option<Account<'info, TokenAccount>>,

    #[account(
        seeds = [PARTICIPANT_SEED, escrow.key().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub participant_record: Option<Account<'info, Participant>>,

    #[account(
        init_if_needed,
        payer = participant,
        space = 8 + TokenPosition::INIT_SPACE,
        seeds = [POSITION_SEED, escrow.key().as_ref(), mint.key().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub position: Account<'info, TokenPosition>,

    #[account(mut)]
    pub participant: Signer<'info>,

    /// Source of the pull; the escrow PDA must be its delegate.
    #[account(
        mut,
        token::mint = mint,
        token::authority = participant,
    )]
    pub participant_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = escrow.roles.recipient,
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,

    pub system_program: Program<'info, System>,
}

pub fn handle_token_deposit(ctx: Context<TokenDeposit>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let escrow_key = ctx.accounts.escrow.key();
    let mint = ctx.accounts.mint.key();
    let wallet = ctx.accounts.participant.key();
    let allowance = allowance_for(&ctx.accounts.participant_token_account, &escrow_key);
    let position_bump = ctx.bumps.position;

    let accounts = &mut *ctx.accounts;
    let vault = accounts
        .token_vault
        .as_ref()
        .ok_or(EscrowError::NotWhitelisted)?
        .to_account_info();
    accounts
        .position
        .bind(escrow_key, mint, wallet, position_bump);

    let unlisted_participant = Participant::default();
    let participant = accounts
        .participant_record
        .as_deref()
        .unwrap_or(&unlisted_participant);
    let mut unlisted_token = TokenConfig::default();
    let config = accounts
        .token_config
        .as_deref_mut()
        .unwrap_or(&mut unlisted_token);

    let outcome = engine::token_deposit(
        &accounts.escrow,
        config,
        participant,
        &mut accounts.position,
        amount,
        allowance,
        now,
    )?;
    let raised = config.raised;

    let token_program = accounts.token_program.to_account_info();
    let escrow_info = accounts.escrow.to_account_info();

    match outcome {
        Outcome::Credited { balance } => {
            transfer_as_escrow(
                token_program,
                accounts.participant_token_account.to_account_info(),
                vault,
                escrow_info,
                &accounts.escrow,
                amount,
            )?;
            msg!("token deposit of {} {} from {}", amount, mint, wallet);
            emit!(TokenDeposited {
                escrow: escrow_key,
                mint,
                wallet,
                amount,
                balance,
                raised,
            });
        }
        Outcome::Swept { amount: swept } => {
            transfer_as_escrow(
                token_program,
                vault,
                accounts.recipient_token_account.to_account_info(),
                escrow_info,
                &accounts.escrow,
                swept,
            )?;
            msg!("final time passed, swept {} {} of {} to recipient", swept, mint, wallet);
            emit!(TokenSwept {
                escrow: escrow_key,
                mint,
                wallet,
                amount: swept,
            });
        }
    }
    Ok(())
}
