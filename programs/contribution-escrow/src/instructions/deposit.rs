use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::constants::PARTICIPANT_SEED;
use crate::engine::{self, NativeDeposit};
use crate::events::{DepositForwarded, Deposited};
use crate::state::{Escrow, Participant};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub escrow: Account<'info, Escrow>,

    /// Absent when the wallet was never whitelisted.
    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, escrow.key().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub participant_record: Option<Account<'info, Participant>>,

    #[account(mut)]
    pub participant: Signer<'info>,

    #[account(mut, address = escrow.roles.recipient)]
    pub recipient: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handle_deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let escrow_key = ctx.accounts.escrow.key();
    let wallet = ctx.accounts.participant.key();

    let accounts = &mut *ctx.accounts;
    let mut unlisted = Participant::default();
    let record = accounts
        .participant_record
        .as_deref_mut()
        .unwrap_or(&mut unlisted);
    let outcome = engine::deposit(&mut accounts.escrow, record, amount, now)?;

    let to = match outcome {
        NativeDeposit::Credited { .. } => accounts.escrow.to_account_info(),
        NativeDeposit::Forwarded => accounts.recipient.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(
        accounts.system_program.to_account_info(),
        Transfer {
            from: accounts.participant.to_account_info(),
            to,
        },
    );
    system_program::transfer(cpi_ctx, amount)?;

    match outcome {
        NativeDeposit::Credited { balance } => {
            msg!("deposit of {} lamports from {}", amount, wallet);
            emit!(Deposited {
                escrow: escrow_key,
                wallet,
                amount,
                balance,
                total_raised: accounts.escrow.total_raised,
            });
        }
        NativeDeposit::Forwarded => {
            msg!("final time passed, forwarding {} lamports to recipient", amount);
            emit!(DepositForwarded {
                escrow: escrow_key,
                wallet,
                recipient: accounts.recipient.key(),
                amount,
            });
        }
    }
    Ok(())
}
