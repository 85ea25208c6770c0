use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Payment is below the entry fee")]
    InsufficientPayment,
    #[msg("Lottery is not open for entries")]
    RoundNotOpen,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Lottery is not waiting for randomness")]
    RoundNotCalculating,
    #[msg("Randomness does not match the outstanding request")]
    UnknownRequest,
    #[msg("Prize transfer to the winner failed")]
    PayoutFailed,
    #[msg("Lottery has reached its player capacity")]
    LotteryFull,
    #[msg("Randomness account is invalid or belongs to another queue")]
    InvalidRandomnessAccount,
    #[msg("Randomness was not committed in the previous slot")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness has not been revealed yet")]
    RandomnessNotResolved,
    #[msg("Winner account does not match the drawn player")]
    WinnerAccountMismatch,
    #[msg("Not authorized")]
    NotAuthorized,
    #[msg("Randomness request has not expired yet")]
    RequestNotExpired,
    #[msg("No player at this index")]
    PlayerIndexOutOfBounds,
    #[msg("Entry fee must be greater than zero")]
    InvalidEntryFee,
    #[msg("Interval must be greater than zero")]
    InvalidInterval,
    #[msg("Request confirmations out of range")]
    InvalidConfirmations,
    #[msg("Math overflow")]
    MathOverflow,
}
