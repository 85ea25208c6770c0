use anchor_lang::prelude::*;

/// A player joined the current round.
#[event]
pub struct EntryRecorded {
    pub player: Pubkey,
    /// Lamports paid for this entry.
    pub payment: u64,
}

/// Randomness was requested and the round moved to `Calculating`.
#[event]
pub struct DrawRequested {
    /// Switchboard randomness account identifying the request.
    pub request_id: Pubkey,
    pub seed_slot: u64,
}

/// The round was settled and the pot paid out.
#[event]
pub struct WinnerPicked {
    pub winner: Pubkey,
    pub prize: u64,
}

/// An expired request was abandoned and the round re-opened.
#[event]
pub struct DrawCancelled {
    pub request_id: Pubkey,
    pub cancelled_at: i64,
}
