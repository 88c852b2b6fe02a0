#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

declare_id!("6mKqGfZyFbDLhmwL3DsZ2fYDG7wq3TQd6E8Gd7jTUp2M");

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod transfer;

use instructions::*;
use state::EscrowConfig;

#[program]
pub mod contribution_escrow {

    use super::*;

    pub fn initialize(ctx: Context<Initialize>, escrow_id: u64, config: EscrowConfig) -> Result<()> {
        instructions::initialize::handle_initialize(ctx, escrow_id, config)
    }

    pub fn add_participant(ctx: Context<AddParticipant>, wallet: Pubkey) -> Result<()> {
        instructions::add_participant::handle_add_participant(ctx, wallet)
    }

    pub fn add_token(ctx: Context<AddToken>) -> Result<()> {
        instructions::add_token::handle_add_token(ctx)
    }

    /// Before final time the lamports are held for the participant; after it
    /// they go straight to the recipient.
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handle_deposit(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handle_withdraw(ctx)
    }

    pub fn authorize(ctx: Context<Authorize>, wallet: Pubkey) -> Result<()> {
        instructions::authorize::handle_authorize(ctx, wallet)
    }

    /// Releases the signer's native balance to the recipient.
    pub fn process(ctx: Context<Process>) -> Result<()> {
        instructions::process::handle_process(ctx)
    }

    /// Before final time pulls `amount` through the escrow's delegate
    /// allowance; after it sweeps the signer's existing position to the
    /// recipient instead.
    pub fn token_deposit(ctx: Context<TokenDeposit>, amount: u64) -> Result<()> {
        instructions::token_deposit::handle_token_deposit(ctx, amount)
    }

    pub fn token_withdraw(ctx: Context<TokenWithdraw>) -> Result<()> {
        instructions::token_withdraw::handle_token_withdraw(ctx)
    }

    pub fn token_process(ctx: Context<TokenProcess>) -> Result<()> {
        instructions::token_process::handle_token_process(ctx)
    }

    pub fn reclaim_tokens<'info>(
        ctx: Context<'_, '_, '_, 'info, ReclaimTokens<'info>>,
    ) -> Result<()> {
        instructions::reclaim_tokens::handle_reclaim_tokens(ctx)
    }

    pub fn extend(ctx: Context<UpdateWindow>, extended_time: i64) -> Result<()> {
        instructions::window::handle_extend(ctx, extended_time)
    }

    pub fn force_close(ctx: Context<UpdateWindow>, final_time: i64) -> Result<()> {
        instructions::window::handle_force_close(ctx, final_time)
    }

    pub fn close<'info>(ctx: Context<'_, '_, '_, 'info, CloseEscrow<'info>>) -> Result<()> {
        instructions::close::handle_close(ctx)
    }
}
