use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("Caller does not hold the required role")]
    Unauthorized,
    #[msg("Address must not be the zero address")]
    ZeroAddress,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Address is not whitelisted")]
    NotWhitelisted,
    #[msg("Token is already whitelisted")]
    AlreadyWhitelisted,
    #[msg("Final time has passed and nothing is left to sweep")]
    DeadlinePassed,
    #[msg("Final time has not passed yet")]
    DeadlineNotPassed,
    #[msg("Final time would exceed max time")]
    WindowOverflow,
    #[msg("Extended time must not be negative")]
    InvalidWindow,
    #[msg("Pending balance is zero")]
    InsufficientBalance,
    #[msg("Participant is not authorized for release")]
    NotAuthorized,
    #[msg("Token balance or allowance is insufficient")]
    TransferFailed,
    #[msg("Escrow is closed")]
    Closed,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Token account does not belong to this escrow")]
    InvalidTokenAccount,
}
