use anchor_lang::prelude::*;

use crate::constants::{MAX_PLAYERS, MAX_REQUEST_CONFIRMATIONS, NUM_WORDS, REQUEST_TIMEOUT_SECS};
use crate::error::ErrorCode;
use crate::randomness::{winner_index, RevealedRandomness};

/// Phase of the current round.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace,
)]
pub enum LotteryState {
    /// Accepting entries; a draw may be triggered.
    #[default]
    Open,
    /// Waiting for the oracle to reveal the requested randomness.
    Calculating,
}

/// Identifies the one in-flight randomness request.
///
/// A Switchboard randomness account can be committed again for later rounds,
/// so the committed seed slot is part of the identity.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct RandomnessRequest {
    pub account: Pubkey,
    pub seed_slot: u64,
}

/// Deployment parameters, fixed at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct LotteryConfig {
    /// Minimum payment (lamports) accepted for one entry.
    pub entry_fee: u64,

    /// Minimum number of seconds between two settled rounds.
    pub interval: i64,

    /// Switchboard queue every randomness account must belong to.
    pub oracle_queue: Pubkey,

    /// Compute unit budget the crank should attach to `fulfill_randomness`.
    pub callback_compute_units: u32,

    /// Slots that must separate the commit seed from the reveal.
    pub request_confirmations: u8,
}

impl LotteryConfig {
    pub fn validate(&self) -> Result<()> {
        require!(self.entry_fee > 0, ErrorCode::InvalidEntryFee);
        require!(self.interval > 0, ErrorCode::InvalidInterval);
        require!(
            self.request_confirmations > 0
                && self.request_confirmations <= MAX_REQUEST_CONFIRMATIONS,
            ErrorCode::InvalidConfirmations
        );
        Ok(())
    }
}

#[account]
#[derive(InitSpace, Default)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// May re-arm a round whose randomness request expired.
    pub authority: Pubkey,

    /// Fee, interval and oracle settings chosen at initialization.
    pub config: LotteryConfig,

    /// Phase of the current round.
    pub state: LotteryState,

    /// Entrants of the current round, in entry order.
    /// Keep `max_len` in sync with `MAX_PLAYERS`.
    #[max_len(100)]
    pub players: Vec<Pubkey>,

    /// UNIX timestamp the current round started at.
    pub last_timestamp: i64,

    /// Winner of the last settled round.
    pub recent_winner: Option<Pubkey>,

    /// Set only while `Calculating`.
    pub pending_request: Option<RandomnessRequest>,

    /// UNIX timestamp of the last draw, `0` while `Open`.
    pub draw_requested_at: i64,
}

/// Result of the automation eligibility check.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    /// Opaque context handed back to `perform_upkeep`. Always empty.
    pub perform_data: Vec<u8>,
}

/// Read-only view of the lottery returned by `get_summary`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LotterySummary {
    pub state: LotteryState,
    pub entry_fee: u64,
    pub interval: i64,
    pub last_timestamp: i64,
    pub player_count: u64,
    pub pot: u64,
    pub recent_winner: Option<Pubkey>,
    pub pending_request: Option<RandomnessRequest>,
    pub callback_compute_units: u32,
    pub request_confirmations: u8,
    pub num_words: u32,
}

/// Lamports held by `account` above its rent-exempt minimum.
pub fn held_balance(account: &AccountInfo, rent: &Rent) -> u64 {
    account
        .lamports()
        .saturating_sub(rent.minimum_balance(account.data_len()))
}

impl Lottery {
    pub fn initialize(
        &mut self,
        bump: u8,
        authority: Pubkey,
        config: LotteryConfig,
        now: i64,
    ) -> Result<()> {
        config.validate()?;

        self.bump = bump;
        self.authority = authority;
        self.config = config;
        self.state = LotteryState::Open;
        self.players = Vec::new();
        self.last_timestamp = now;
        self.recent_winner = None;
        self.pending_request = None;
        self.draw_requested_at = 0;
        Ok(())
    }

    /// Appends `player` to the round. The caller moves `payment` into the pot.
    pub fn record_entry(&mut self, player: Pubkey, payment: u64) -> Result<()> {
        require!(
            payment >= self.config.entry_fee,
            ErrorCode::InsufficientPayment
        );
        require!(self.state == LotteryState::Open, ErrorCode::RoundNotOpen);
        require!(self.players.len() < MAX_PLAYERS, ErrorCode::LotteryFull);

        self.players.push(player);
        Ok(())
    }

    /// True when the round is open, the interval has elapsed, and both the pot
    /// and the player list are non-empty.
    pub fn upkeep_needed(&self, now: i64, pot: u64) -> bool {
        let is_open = self.state == LotteryState::Open;
        let time_passed = now.saturating_sub(self.last_timestamp) >= self.config.interval;
        let has_players = !self.players.is_empty();
        let has_balance = pot > 0;

        is_open && time_passed && has_players && has_balance
    }

    fn ensure_upkeep_needed(&self, now: i64, pot: u64) -> Result<()> {
        if !self.upkeep_needed(now, pot) {
            msg!(
                "Upkeep not needed: state={:?}, balance={}, players={}, elapsed={}",
                self.state,
                pot,
                self.players.len(),
                now.saturating_sub(self.last_timestamp)
            );
            return err!(ErrorCode::UpkeepNotNeeded);
        }
        Ok(())
    }

    /// Moves the round to `Calculating` with the request produced by `commit`
    /// outstanding.
    ///
    /// `commit` only runs once the round is eligible for a draw.
    pub fn begin_draw<F>(&mut self, now: i64, pot: u64, commit: F) -> Result<RandomnessRequest>
    where
        F: FnOnce() -> Result<RandomnessRequest>,
    {
        self.ensure_upkeep_needed(now, pot)?;
        let request = commit()?;

        self.state = LotteryState::Calculating;
        self.pending_request = Some(request);
        self.draw_requested_at = now;
        Ok(request)
    }

    /// Resolves the winner for a revealed request without touching the round.
    pub fn select_winner(&self, revealed: &RevealedRandomness) -> Result<Pubkey> {
        require!(
            self.state == LotteryState::Calculating,
            ErrorCode::RoundNotCalculating
        );
        let pending = self.pending_request.ok_or(ErrorCode::UnknownRequest)?;
        require!(pending == revealed.request, ErrorCode::UnknownRequest);

        let value = revealed.value.ok_or(ErrorCode::RandomnessNotResolved)?;
        let depth = revealed.reveal_slot.saturating_sub(pending.seed_slot);
        if depth < u64::from(self.config.request_confirmations) {
            msg!(
                "Reveal depth {} below required {}",
                depth,
                self.config.request_confirmations
            );
            return err!(ErrorCode::RandomnessNotResolved);
        }

        let index = winner_index(&value, self.players.len())
            .ok_or(ErrorCode::PlayerIndexOutOfBounds)?;
        Ok(self.players[index])
    }

    /// Starts a fresh round once `winner` has been paid.
    pub fn close_round(&mut self, winner: Pubkey, now: i64) {
        self.recent_winner = Some(winner);
        self.players.clear();
        self.last_timestamp = now;
        self.state = LotteryState::Open;
        self.pending_request = None;
        self.draw_requested_at = 0;
    }

    /// Abandons an expired request. Players and pot carry over and the round
    /// clock is left untouched, so the next upkeep can draw again at once.
    pub fn cancel_stale_draw(&mut self, caller: Pubkey, now: i64) -> Result<RandomnessRequest> {
        require_keys_eq!(caller, self.authority, ErrorCode::NotAuthorized);
        require!(
            self.state == LotteryState::Calculating,
            ErrorCode::RoundNotCalculating
        );
        let request = self.pending_request.ok_or(ErrorCode::UnknownRequest)?;
        require!(
            now.saturating_sub(self.draw_requested_at) >= REQUEST_TIMEOUT_SECS,
            ErrorCode::RequestNotExpired
        );

        self.state = LotteryState::Open;
        self.pending_request = None;
        self.draw_requested_at = 0;
        Ok(request)
    }

    pub fn player(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.players.get(i))
            .copied()
            .ok_or_else(|| error!(ErrorCode::PlayerIndexOutOfBounds))
    }

    pub fn summary(&self, pot: u64) -> LotterySummary {
        LotterySummary {
            state: self.state,
            entry_fee: self.config.entry_fee,
            interval: self.config.interval,
            last_timestamp: self.last_timestamp,
            player_count: self.players.len() as u64,
            pot,
            recent_winner: self.recent_winner,
            pending_request: self.pending_request,
            callback_compute_units: self.config.callback_compute_units,
            request_confirmations: self.config.request_confirmations,
            num_words: NUM_WORDS,
        }
    }
}
