use anchor_lang::prelude::*;

#[event]
pub struct EscrowInitialized {
    pub escrow: Pubkey,
    pub owner: Pubkey,
    pub recipient: Pubkey,
    pub final_time: i64,
    pub max_time: i64,
}

#[event]
pub struct ParticipantWhitelisted {
    pub escrow: Pubkey,
    pub wallet: Pubkey,
}

#[event]
pub struct TokenWhitelisted {
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
}

#[event]
pub struct Deposited {
    pub escrow: Pubkey,
    pub wallet: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub total_raised: u64,
}

#[event]
pub struct DepositForwarded {
    pub escrow: Pubkey,
    pub wallet: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
}

#[event]
pub struct Withdrawn {
    pub escrow: Pubkey,
    pub wallet: Pubkey,
    pub amount: u64,
    pub total_raised: u64,
}

#[event]
pub struct ParticipantAuthorized {
    pub escrow: Pubkey,
    pub wallet: Pubkey,
}

#[event]
pub struct Released {
    pub escrow: Pubkey,
    pub wallet: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub total_raised: u64,
}

#[event]
pub struct TokenDeposited {
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub wallet: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub raised: u64,
}

#[event]
pub struct TokenSwept {
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub wallet: Pubkey,
    pub amount: u64,
}

#[event]
pub struct TokenWithdrawn {
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub wallet: Pubkey,
    pub amount: u64,
    pub raised: u64,
}

#[event]
pub struct TokenReleased {
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub wallet: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub raised: u64,
}

#[event]
pub struct TokensReclaimed {
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct WindowExtended {
    pub escrow: Pubkey,
    pub extended_time: i64,
    pub final_time: i64,
}

#[event]
pub struct FinalTimeForced {
    pub escrow: Pubkey,
    pub final_time: i64,
}

#[event]
pub struct EscrowClosed {
    pub escrow: Pubkey,
    pub lamports: u64,
    pub mints: u32,
}
