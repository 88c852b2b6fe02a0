use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::spl_token::state::Account as SplTokenAccount;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::engine::Allowance;
use crate::error::EscrowError;
use crate::state::{Escrow, EscrowSigner, TokenConfig};

/// Moves lamports out of a program-owned account.
pub fn move_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    let remaining = from
        .lamports()
        .checked_sub(amount)
        .ok_or(EscrowError::Overflow)?;
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(EscrowError::Overflow)?;
    **from.try_borrow_mut_lamports()? = remaining;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

/// Lamports held above the rent-exempt floor of the account's data.
pub fn surplus_lamports(info: &AccountInfo, rent: &Rent) -> u64 {
    info.lamports().saturating_sub(rent.minimum_balance(info.data_len()))
}

/// What `spender` may pull from `source` as its delegate.
pub fn allowance_for(source: &SplTokenAccount, spender: &Pubkey) -> Allowance {
    let delegated = match source.delegate {
        COption::Some(delegate) if delegate == *spender => source.delegated_amount,
        _ => 0,
    };
    Allowance {
        balance: source.amount,
        delegated,
    }
}

/// Token transfer signed by the escrow PDA, either out of a vault or as the
/// participant's delegate.
pub fn transfer_as_escrow<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    escrow_info: AccountInfo<'info>,
    escrow: &Escrow,
    amount: u64,
) -> Result<()> {
    let signer = EscrowSigner::new(escrow);
    let seeds = signer.seeds();
    let signer_seeds = &[&seeds[..]];

    let transfer_instruction = Transfer {
        from,
        to,
        authority: escrow_info,
    };
    let cpi_ctx = CpiContext::new_with_signer(token_program, transfer_instruction, signer_seeds);

    token::transfer(cpi_ctx, amount)
}

/// One listed mint of a `reclaim_tokens` or `close` call.
pub struct SweepTarget<'info> {
    pub config: TokenConfig,
    pub vault: AccountInfo<'info>,
    pub vault_amount: u64,
    pub destination: AccountInfo<'info>,
}

/// Reads `(token_config, token_vault, recipient_token_account)` triples from
/// the remaining accounts. Each mint may be listed once.
pub fn sweep_targets<'info>(
    remaining: &[AccountInfo<'info>],
    escrow_key: &Pubkey,
    recipient: &Pubkey,
) -> Result<Vec<SweepTarget<'info>>> {
    require!(remaining.len() % 3 == 0, EscrowError::InvalidTokenAccount);

    let mut targets: Vec<SweepTarget<'info>> = Vec::with_capacity(remaining.len() / 3);
    for chunk in remaining.chunks(3) {
        let (config_info, vault, destination) = (&chunk[0], &chunk[1], &chunk[2]);

        require_keys_eq!(*config_info.owner, crate::ID, EscrowError::InvalidTokenAccount);
        let config = TokenConfig::try_deserialize(&mut &config_info.data.borrow()[..])?;
        require_keys_eq!(config.escrow, *escrow_key, EscrowError::InvalidTokenAccount);
        require_keys_eq!(config.vault, vault.key(), EscrowError::InvalidTokenAccount);
        require!(
            targets
                .iter()
                .all(|seen| seen.config.mint != config.mint && seen.vault.key != vault.key),
            EscrowError::InvalidTokenAccount
        );

        let vault_state = read_token_account(vault)?;
        let destination_state = read_token_account(destination)?;
        require_keys_eq!(destination_state.mint, config.mint, EscrowError::InvalidTokenAccount);
        require_keys_eq!(destination_state.owner, *recipient, EscrowError::InvalidTokenAccount);

        targets.push(SweepTarget {
            config,
            vault: vault.clone(),
            vault_amount: vault_state.amount,
            destination: destination.clone(),
        });
    }
    Ok(targets)
}

fn read_token_account(info: &AccountInfo) -> Result<TokenAccount> {
    require_keys_eq!(*info.owner, token::ID, EscrowError::InvalidTokenAccount);
    TokenAccount::try_deserialize(&mut &info.data.borrow()[..])
}
