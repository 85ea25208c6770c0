use anchor_lang::prelude::*;

use crate::constants::{LOTTERY_SEED, SWITCHBOARD_PROGRAM_ID};
use crate::error::ErrorCode;
use crate::events::DrawRequested;
use crate::randomness;
use crate::state::{held_balance, Lottery};

/// Accounts required to start a draw.
///
/// Ensures:
/// 1. The round is eligible, re-checked on-chain.
/// 2. The randomness account belongs to the configured queue.
/// 3. The randomness was committed in the previous slot and is unrevealed.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    /// The automation crank submitting the draw.
    pub payer: Signer<'info>,

    /// The lottery state account.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    /// Randomness account from Switchboard.
    /// CHECK: Owner is checked here; the data is validated within the handler.
    #[account(owner = SWITCHBOARD_PROGRAM_ID @ ErrorCode::InvalidRandomnessAccount)]
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Requests randomness and moves the round to `Calculating`.
///
/// # Arguments
/// * `ctx` - Context containing PerformUpkeep accounts
/// * `_perform_data` - Opaque context from `check_upkeep`, unused
pub fn process_perform_upkeep(ctx: Context<PerformUpkeep>, _perform_data: Vec<u8>) -> Result<()> {
    let clock = Clock::get()?;
    let rent = Rent::get()?;
    let pot = held_balance(&ctx.accounts.lottery.to_account_info(), &rent);
    let now = clock.unix_timestamp;

    let oracle_queue = ctx.accounts.lottery.config.oracle_queue;
    let randomness_info = ctx.accounts.randomness_account_data.to_account_info();
    let request = ctx.accounts.lottery.begin_draw(now, pot, || {
        randomness::read_commitment(&randomness_info, &oracle_queue, &clock)
    })?;

    msg!(
        "Draw requested: request={}, seed_slot={}, players={}, pot={}",
        request.account,
        request.seed_slot,
        ctx.accounts.lottery.players.len(),
        pot
    );
    emit!(DrawRequested {
        request_id: request.account,
        seed_slot: request.seed_slot,
    });
    Ok(())
}
