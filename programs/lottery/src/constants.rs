use anchor_lang::prelude::Pubkey;
use solana_program::native_token::LAMPORTS_PER_SOL;

/// Seed of the single lottery PDA.
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Maximum number of entries held in one round.
/// Must match the `max_len` on `Lottery::players`.
pub const MAX_PLAYERS: usize = 100;

/// Random words consumed per draw.
pub const NUM_WORDS: u32 = 1;

/// Upper bound accepted for `LotteryConfig::request_confirmations`.
pub const MAX_REQUEST_CONFIRMATIONS: u8 = 200;

/// Seconds a draw may stay unfulfilled before the authority can re-arm the round.
pub const REQUEST_TIMEOUT_SECS: i64 = 600;

/// Suggested entry fee for new deployments (0.01 SOL).
pub const DEFAULT_ENTRY_FEE: u64 = LAMPORTS_PER_SOL / 100;

/// Switchboard on-demand program; it must own every randomness account.
#[cfg(not(feature = "devnet"))]
pub const SWITCHBOARD_PROGRAM_ID: Pubkey = switchboard_on_demand::ON_DEMAND_MAINNET_PID;
#[cfg(feature = "devnet")]
pub const SWITCHBOARD_PROGRAM_ID: Pubkey = switchboard_on_demand::ON_DEMAND_DEVNET_PID;
