//! PDA seeds shared by the account constraints and the escrow signer.

pub const ESCROW_SEED: &[u8] = b"escrow";

pub const PARTICIPANT_SEED: &[u8] = b"participant";

pub const TOKEN_SEED: &[u8] = b"token";

pub const TOKEN_VAULT_SEED: &[u8] = b"token_vault";

pub const POSITION_SEED: &[u8] = b"position";
