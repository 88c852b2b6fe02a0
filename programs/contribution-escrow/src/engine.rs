//! Escrow bookkeeping.
//!
//! Every function here validates first and mutates last, so an `Err` leaves
//! the accounts it was handed untouched. None of them move value: they
//! return what the calling instruction has to transfer.

use anchor_lang::prelude::*;

use crate::error::EscrowError;
use crate::state::{
    require_non_zero, Escrow, EscrowStatus, Participant, Phase, Role, TokenConfig, TokenPosition,
};

/// What a native deposit did with the offered lamports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeDeposit {
    /// Held by the escrow; carries the participant's new balance.
    Credited { balance: u64 },
    /// Window is over; the lamports go straight to the recipient.
    Forwarded,
}

/// What a token deposit did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenDeposit {
    /// The offered amount is pulled into the vault.
    Credited { balance: u64 },
    /// Window is over; the existing position goes to the recipient.
    Swept { amount: u64 },
}

/// How much the escrow may pull from a participant's token account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Allowance {
    pub balance: u64,
    pub delegated: u64,
}

impl Allowance {
    pub fn covers(&self, amount: u64) -> bool {
        self.balance >= amount && self.delegated >= amount
    }
}

pub fn add_participant(
    escrow: &Escrow,
    caller: &Pubkey,
    wallet: Pubkey,
    record: &mut Participant,
    escrow_key: Pubkey,
    bump: u8,
) -> Result<bool> {
    escrow.ensure_open()?;
    escrow.require_role(caller, Role::Manager)?;
    require_non_zero(&wallet)?;

    record.bind(escrow_key, wallet, bump);
    let added = !record.whitelisted;
    record.whitelisted = true;
    Ok(added)
}

pub fn add_token(
    escrow: &Escrow,
    caller: &Pubkey,
    mint: Pubkey,
    vault: Pubkey,
    config: &mut TokenConfig,
    escrow_key: Pubkey,
    bump: u8,
) -> Result<()> {
    escrow.ensure_open()?;
    escrow.require_role(caller, Role::Manager)?;
    require_non_zero(&mint)?;
    require!(!config.whitelisted, EscrowError::AlreadyWhitelisted);

    *config = TokenConfig {
        escrow: escrow_key,
        mint,
        vault,
        whitelisted: true,
        raised: 0,
        bump,
    };
    Ok(())
}

pub fn deposit(
    escrow: &mut Escrow,
    participant: &mut Participant,
    amount: u64,
    now: i64,
) -> Result<NativeDeposit> {
    escrow.ensure_open()?;
    require!(amount > 0, EscrowError::ZeroAmount);
    participant.require_whitelisted()?;

    match escrow.phase(now) {
        Phase::BeforeFinal => {
            let balance = participant
                .balance
                .checked_add(amount)
                .ok_or(EscrowError::Overflow)?;
            let total_raised = escrow
                .total_raised
                .checked_add(amount)
                .ok_or(EscrowError::Overflow)?;
            participant.balance = balance;
            escrow.total_raised = total_raised;
            Ok(NativeDeposit::Credited { balance })
        }
        Phase::PastFinal => Ok(NativeDeposit::Forwarded),
    }
}

pub fn withdraw(escrow: &mut Escrow, participant: &mut Participant) -> Result<u64> {
    escrow.ensure_open()?;
    drain_native(escrow, participant)
}

pub fn authorize(
    escrow: &Escrow,
    caller: &Pubkey,
    wallet: Pubkey,
    record: &mut Participant,
    escrow_key: Pubkey,
    bump: u8,
) -> Result<()> {
    escrow.ensure_open()?;
    escrow.require_role(caller, Role::Manager)?;
    require_non_zero(&wallet)?;

    record.bind(escrow_key, wallet, bump);
    record.authorized = true;
    Ok(())
}

/// Releases the caller's whole native balance. Authorization stays set.
pub fn process(escrow: &mut Escrow, participant: &mut Participant) -> Result<u64> {
    escrow.ensure_open()?;
    participant.require_authorized()?;
    drain_native(escrow, participant)
}

pub fn token_deposit(
    escrow: &Escrow,
    config: &mut TokenConfig,
    participant: &Participant,
    position: &mut TokenPosition,
    amount: u64,
    allowance: Allowance,
    now: i64,
) -> Result<TokenDeposit> {
    escrow.ensure_open()?;
    require!(amount > 0, EscrowError::ZeroAmount);
    config.require_whitelisted()?;
    participant.require_whitelisted()?;

    match escrow.phase(now) {
        Phase::BeforeFinal => {
            require!(allowance.covers(amount), EscrowError::TransferFailed);
            let balance = position
                .balance
                .checked_add(amount)
                .ok_or(EscrowError::Overflow)?;
            let raised = config
                .raised
                .checked_add(amount)
                .ok_or(EscrowError::Overflow)?;
            position.balance = balance;
            config.raised = raised;
            Ok(TokenDeposit::Credited { balance })
        }
        Phase::PastFinal => {
            require!(position.balance > 0, EscrowError::DeadlinePassed);
            let amount = drain_position(config, position)?;
            Ok(TokenDeposit::Swept { amount })
        }
    }
}

pub fn token_withdraw(
    escrow: &Escrow,
    config: &mut TokenConfig,
    position: &mut TokenPosition,
) -> Result<u64> {
    escrow.ensure_open()?;
    drain_position(config, position)
}

pub fn token_process(
    escrow: &Escrow,
    config: &mut TokenConfig,
    participant: &Participant,
    position: &mut TokenPosition,
) -> Result<u64> {
    escrow.ensure_open()?;
    participant.require_authorized()?;
    drain_position(config, position)
}

pub fn extend(escrow: &mut Escrow, caller: &Pubkey, extended_time: i64) -> Result<()> {
    escrow.ensure_open()?;
    escrow.require_role(caller, Role::Owner)?;
    escrow.window.extend(extended_time)
}

pub fn force_close(escrow: &mut Escrow, caller: &Pubkey, final_time: i64) -> Result<()> {
    escrow.ensure_open()?;
    escrow.require_role(caller, Role::Owner)?;
    escrow.window.force_final_time(final_time)
}

/// Gate shared by `reclaim_tokens` and `close`.
pub fn begin_sweep(escrow: &Escrow, caller: &Pubkey, now: i64) -> Result<()> {
    escrow.ensure_open()?;
    escrow.require_role(caller, Role::Sweeper)?;
    escrow.require_past_final(now)
}

pub fn close(escrow: &mut Escrow, caller: &Pubkey, now: i64) -> Result<()> {
    begin_sweep(escrow, caller, now)?;
    escrow.status = EscrowStatus::Closed;
    Ok(())
}

fn drain_native(escrow: &mut Escrow, participant: &mut Participant) -> Result<u64> {
    let amount = participant.balance;
    require!(amount > 0, EscrowError::InsufficientBalance);
    let total_raised = escrow
        .total_raised
        .checked_sub(amount)
        .ok_or(EscrowError::Overflow)?;
    participant.balance = 0;
    escrow.total_raised = total_raised;
    Ok(amount)
}

fn drain_position(config: &mut TokenConfig, position: &mut TokenPosition) -> Result<u64> {
    let amount = position.balance;
    require!(amount > 0, EscrowError::InsufficientBalance);
    let raised = config
        .raised
        .checked_sub(amount)
        .ok_or(EscrowError::Overflow)?;
    position.balance = 0;
    config.raised = raised;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EscrowConfig;
    use anchor_lang::error::Error;

    const NOW: i64 = 5_000_000;
    const LATE: i64 = 5_400_000;

    struct Fixture {
        escrow: Escrow,
        escrow_key: Pubkey,
        alice: Participant,
        config: TokenConfig,
        position: TokenPosition,
    }

    fn fixture() -> Fixture {
        let owner = Pubkey::new_unique();
        let config = EscrowConfig {
            manager: Pubkey::new_unique(),
            recipient: Pubkey::new_unique(),
            recipient_container: Pubkey::new_unique(),
            deadline: 5_300_000,
            extended_time: 1_000,
            max_time: 5_302_000,
        };
        let escrow = Escrow::open(1, owner, &config, 255).unwrap();
        let escrow_key = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let mut alice = Participant::default();
        add_participant(&escrow, &config.manager, wallet, &mut alice, escrow_key, 254).unwrap();

        let mut token = TokenConfig::default();
        add_token(
            &escrow,
            &config.manager,
            mint,
            Pubkey::new_unique(),
            &mut token,
            escrow_key,
            253,
        )
        .unwrap();

        let mut position = TokenPosition::default();
        position.bind(escrow_key, mint, wallet, 252);

        Fixture {
            escrow,
            escrow_key,
            alice,
            config: token,
            position,
        }
    }

    fn approved(amount: u64) -> Allowance {
        Allowance {
            balance: amount,
            delegated: amount,
        }
    }

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: EscrowError) {
        assert_eq!(result.unwrap_err(), Error::from(expected));
    }

    #[test]
    fn add_participant_requires_manager_and_non_zero_wallet() {
        let f = fixture();
        let mut record = Participant::default();
        let owner = f.escrow.roles.owner;
        let manager = f.escrow.roles.manager;

        assert_err(
            add_participant(&f.escrow, &owner, Pubkey::new_unique(), &mut record, f.escrow_key, 1),
            EscrowError::Unauthorized,
        );
        assert_err(
            add_participant(&f.escrow, &manager, Pubkey::default(), &mut record, f.escrow_key, 1),
            EscrowError::ZeroAddress,
        );
        assert_eq!(record, Participant::default());
    }

    #[test]
    fn re_adding_a_participant_is_a_no_op() {
        let mut f = fixture();
        let manager = f.escrow.roles.manager;
        let wallet = f.alice.wallet;
        deposit(&mut f.escrow, &mut f.alice, 10, NOW).unwrap();

        let added =
            add_participant(&f.escrow, &manager, wallet, &mut f.alice, f.escrow_key, 9).unwrap();
        assert!(!added);
        assert!(f.alice.whitelisted);
        assert_eq!(f.alice.balance, 10);
        assert_eq!(f.alice.bump, 254);
    }

    #[test]
    fn duplicate_token_is_rejected() {
        let mut f = fixture();
        let manager = f.escrow.roles.manager;
        let before = f.config.clone();
        let mint = f.config.mint;

        assert_err(
            add_token(&f.escrow, &manager, mint, Pubkey::new_unique(), &mut f.config, f.escrow_key, 1),
            EscrowError::AlreadyWhitelisted,
        );
        assert_eq!(f.config, before);
    }

    #[test]
    fn add_token_rejects_zero_mint_and_non_manager() {
        let f = fixture();
        let mut config = TokenConfig::default();
        let manager = f.escrow.roles.manager;
        let stranger = Pubkey::new_unique();

        assert_err(
            add_token(&f.escrow, &manager, Pubkey::default(), Pubkey::new_unique(), &mut config, f.escrow_key, 1),
            EscrowError::ZeroAddress,
        );
        assert_err(
            add_token(&f.escrow, &stranger, Pubkey::new_unique(), Pubkey::new_unique(), &mut config, f.escrow_key, 1),
            EscrowError::Unauthorized,
        );
        assert_eq!(config, TokenConfig::default());
    }

    #[test]
    fn deposit_checks_amount_before_whitelist() {
        let mut f = fixture();
        let mut stranger = Participant::default();

        assert_err(deposit(&mut f.escrow, &mut stranger, 0, NOW), EscrowError::ZeroAmount);
        assert_err(deposit(&mut f.escrow, &mut stranger, 10, NOW), EscrowError::NotWhitelisted);
        assert_eq!(f.escrow.total_raised, 0);
    }

    #[test]
    fn deposit_after_final_time_is_forwarded() {
        let mut f = fixture();
        deposit(&mut f.escrow, &mut f.alice, 50, NOW).unwrap();

        let outcome = deposit(&mut f.escrow, &mut f.alice, 10, LATE).unwrap();
        assert_eq!(outcome, NativeDeposit::Forwarded);
        assert_eq!(f.alice.balance, 50);
        assert_eq!(f.escrow.total_raised, 50);
    }

    #[test]
    fn deposit_on_final_time_is_still_credited() {
        let mut f = fixture();
        let final_time = f.escrow.window.final_time;
        let outcome = deposit(&mut f.escrow, &mut f.alice, 7, final_time).unwrap();
        assert_eq!(outcome, NativeDeposit::Credited { balance: 7 });
    }

    #[test]
    fn withdraw_is_not_gated_by_the_window() {
        let mut f = fixture();
        deposit(&mut f.escrow, &mut f.alice, 40, NOW).unwrap();

        assert_eq!(withdraw(&mut f.escrow, &mut f.alice).unwrap(), 40);
        assert_eq!(f.escrow.total_raised, 0);
        assert_err(withdraw(&mut f.escrow, &mut f.alice), EscrowError::InsufficientBalance);
    }

    #[test]
    fn process_requires_authorization_then_balance() {
        let mut f = fixture();
        let manager = f.escrow.roles.manager;
        let wallet = f.alice.wallet;

        assert_err(process(&mut f.escrow, &mut f.alice), EscrowError::NotAuthorized);

        authorize(&f.escrow, &manager, wallet, &mut f.alice, f.escrow_key, 0).unwrap();
        assert_err(process(&mut f.escrow, &mut f.alice), EscrowError::InsufficientBalance);

        deposit(&mut f.escrow, &mut f.alice, 30, NOW).unwrap();
        assert_eq!(process(&mut f.escrow, &mut f.alice).unwrap(), 30);
        assert_eq!(f.escrow.total_raised, 0);
    }

    #[test]
    fn authorization_survives_release() {
        let mut f = fixture();
        let manager = f.escrow.roles.manager;
        let wallet = f.alice.wallet;
        authorize(&f.escrow, &manager, wallet, &mut f.alice, f.escrow_key, 0).unwrap();

        deposit(&mut f.escrow, &mut f.alice, 5, NOW).unwrap();
        process(&mut f.escrow, &mut f.alice).unwrap();
        assert!(f.alice.authorized);

        deposit(&mut f.escrow, &mut f.alice, 6, NOW).unwrap();
        assert_eq!(process(&mut f.escrow, &mut f.alice).unwrap(), 6);
    }

    #[test]
    fn authorize_creates_record_without_whitelisting() {
        let f = fixture();
        let manager = f.escrow.roles.manager;
        let wallet = Pubkey::new_unique();
        let mut record = Participant::default();

        authorize(&f.escrow, &manager, wallet, &mut record, f.escrow_key, 7).unwrap();
        assert!(record.authorized);
        assert!(!record.whitelisted);
        assert_eq!(record.wallet, wallet);
        assert_eq!(record.bump, 7);

        assert_err(
            authorize(&f.escrow, &manager, Pubkey::default(), &mut record, f.escrow_key, 7),
            EscrowError::ZeroAddress,
        );
        assert_err(
            authorize(&f.escrow, &wallet, wallet, &mut record, f.escrow_key, 7),
            EscrowError::Unauthorized,
        );
    }

    #[test]
    fn token_deposit_requires_whitelisted_mint_and_participant() {
        let mut f = fixture();
        let mut unlisted = TokenConfig::default();
        let stranger = Participant::default();

        assert_err(
            token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 0, approved(10), NOW),
            EscrowError::ZeroAmount,
        );
        assert_err(
            token_deposit(&f.escrow, &mut unlisted, &f.alice, &mut f.position, 10, approved(10), NOW),
            EscrowError::NotWhitelisted,
        );
        assert_err(
            token_deposit(&f.escrow, &mut f.config, &stranger, &mut f.position, 10, approved(10), NOW),
            EscrowError::NotWhitelisted,
        );
        assert_eq!(f.config.raised, 0);
    }

    #[test]
    fn token_deposit_without_allowance_fails_transfer() {
        let mut f = fixture();
        let short = Allowance {
            balance: 100,
            delegated: 9,
        };
        assert_err(
            token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 10, short, NOW),
            EscrowError::TransferFailed,
        );
        let broke = Allowance {
            balance: 9,
            delegated: 100,
        };
        assert_err(
            token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 10, broke, NOW),
            EscrowError::TransferFailed,
        );
        assert_eq!(f.position.balance, 0);
        assert_eq!(f.config.raised, 0);
    }

    #[test]
    fn late_token_deposit_sweeps_existing_position_once() {
        let mut f = fixture();
        token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 10, approved(10), NOW)
            .unwrap();

        let outcome =
            token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 10, Allowance::default(), LATE)
                .unwrap();
        assert_eq!(outcome, TokenDeposit::Swept { amount: 10 });
        assert_eq!(f.position.balance, 0);
        assert_eq!(f.config.raised, 0);

        assert_err(
            token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 10, approved(10), LATE),
            EscrowError::DeadlinePassed,
        );
    }

    #[test]
    fn token_process_uses_participant_authorization() {
        let mut f = fixture();
        let manager = f.escrow.roles.manager;
        let wallet = f.alice.wallet;
        token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 25, approved(25), NOW)
            .unwrap();

        assert_err(
            token_process(&f.escrow, &mut f.config, &f.alice, &mut f.position),
            EscrowError::NotAuthorized,
        );
        authorize(&f.escrow, &manager, wallet, &mut f.alice, f.escrow_key, 0).unwrap();
        assert_eq!(
            token_process(&f.escrow, &mut f.config, &f.alice, &mut f.position).unwrap(),
            25
        );
        assert_eq!(f.config.raised, 0);
        assert_err(
            token_process(&f.escrow, &mut f.config, &f.alice, &mut f.position),
            EscrowError::InsufficientBalance,
        );
    }

    #[test]
    fn token_withdraw_refunds_position() {
        let mut f = fixture();
        token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 10, approved(10), NOW)
            .unwrap();

        assert_eq!(token_withdraw(&f.escrow, &mut f.config, &mut f.position).unwrap(), 10);
        assert_err(
            token_withdraw(&f.escrow, &mut f.config, &mut f.position),
            EscrowError::InsufficientBalance,
        );
    }

    #[test]
    fn sweeps_wait_for_final_time_and_sweeper() {
        let mut f = fixture();
        let owner = f.escrow.roles.owner;
        let container = f.escrow.roles.recipient_container;
        let manager = f.escrow.roles.manager;

        assert_err(begin_sweep(&f.escrow, &container, NOW), EscrowError::DeadlineNotPassed);
        assert_err(begin_sweep(&f.escrow, &manager, LATE), EscrowError::Unauthorized);
        begin_sweep(&f.escrow, &container, LATE).unwrap();

        force_close(&mut f.escrow, &owner, 0).unwrap();
        begin_sweep(&f.escrow, &owner, NOW).unwrap();
    }

    #[test]
    fn untracked_surplus_excludes_raised() {
        let mut f = fixture();
        token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 10, approved(10), NOW)
            .unwrap();
        assert_eq!(f.config.untracked(10), 0);
        assert_eq!(f.config.untracked(17), 7);
        assert_eq!(f.config.untracked(3), 0);
    }

    #[test]
    fn window_operations_are_owner_only() {
        let mut f = fixture();
        let manager = f.escrow.roles.manager;
        assert_err(extend(&mut f.escrow, &manager, 10), EscrowError::Unauthorized);
        assert_err(force_close(&mut f.escrow, &manager, 0), EscrowError::Unauthorized);
        assert_eq!(f.escrow.window.final_time, 5_301_000);
    }

    #[test]
    fn closed_escrow_rejects_everything() {
        let mut f = fixture();
        let owner = f.escrow.roles.owner;
        let manager = f.escrow.roles.manager;
        let wallet = f.alice.wallet;
        deposit(&mut f.escrow, &mut f.alice, 10, NOW).unwrap();
        token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 10, approved(10), NOW)
            .unwrap();

        assert_err(close(&mut f.escrow, &owner, NOW), EscrowError::DeadlineNotPassed);
        close(&mut f.escrow, &owner, LATE).unwrap();
        assert!(f.escrow.is_closed());

        let escrow_before = f.escrow.clone();
        let alice_before = f.alice.clone();
        let config_before = f.config.clone();
        let position_before = f.position.clone();

        assert_err(deposit(&mut f.escrow, &mut f.alice, 0, NOW), EscrowError::Closed);
        assert_err(withdraw(&mut f.escrow, &mut f.alice), EscrowError::Closed);
        assert_err(process(&mut f.escrow, &mut f.alice), EscrowError::Closed);
        assert_err(
            authorize(&f.escrow, &manager, wallet, &mut f.alice, f.escrow_key, 0),
            EscrowError::Closed,
        );
        assert_err(
            add_participant(&f.escrow, &manager, Pubkey::default(), &mut f.alice, f.escrow_key, 0),
            EscrowError::Closed,
        );
        assert_err(
            token_deposit(&f.escrow, &mut f.config, &f.alice, &mut f.position, 10, approved(10), NOW),
            EscrowError::Closed,
        );
        assert_err(token_withdraw(&f.escrow, &mut f.config, &mut f.position), EscrowError::Closed);
        assert_err(
            token_process(&f.escrow, &mut f.config, &f.alice, &mut f.position),
            EscrowError::Closed,
        );
        assert_err(extend(&mut f.escrow, &owner, 10), EscrowError::Closed);
        assert_err(force_close(&mut f.escrow, &owner, 0), EscrowError::Closed);
        assert_err(begin_sweep(&f.escrow, &owner, LATE), EscrowError::Closed);
        assert_err(close(&mut f.escrow, &owner, LATE), EscrowError::Closed);

        assert_eq!(f.escrow, escrow_before);
        assert_eq!(f.alice, alice_before);
        assert_eq!(f.config, config_before);
        assert_eq!(f.position, position_before);
    }
}
