use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::error::ErrorCode;
use crate::events::DrawCancelled;
use crate::state::{Lottery, LotteryConfig};

/// Accounts required to create the lottery.
/// The payer becomes the lottery authority.
#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The lottery state account. It also holds the pot.
    #[account(
        init,
        payer = payer,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Initializes the lottery with its immutable configuration and opens the
/// first round.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeLottery accounts
/// * `config` - Entry fee, draw interval and oracle parameters
pub fn process_initialize_lottery(
    ctx: Context<InitializeLottery>,
    config: LotteryConfig,
) -> Result<()> {
    let clock = Clock::get()?;
    let authority = ctx.accounts.payer.key();

    ctx.accounts
        .lottery
        .initialize(ctx.bumps.lottery, authority, config, clock.unix_timestamp)?;

    msg!(
        "Lottery initialized: entry_fee={}, interval={}, queue={}",
        config.entry_fee,
        config.interval,
        config.oracle_queue
    );
    Ok(())
}

/// Accounts required to abandon a randomness request the oracle never served.
#[derive(Accounts)]
pub struct CancelStaleDraw<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub lottery: Account<'info, Lottery>,
}

/// Re-opens a round stuck in `Calculating` once `REQUEST_TIMEOUT_SECS` have
/// passed since the draw. Entries and pot stay in place for the next draw.
pub fn process_cancel_stale_draw(ctx: Context<CancelStaleDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let authority = ctx.accounts.authority.key();

    let request = ctx
        .accounts
        .lottery
        .cancel_stale_draw(authority, clock.unix_timestamp)?;

    msg!(
        "Draw cancelled: request={}, seed_slot={}",
        request.account,
        request.seed_slot
    );
    emit!(DrawCancelled {
        request_id: request.account,
        cancelled_at: clock.unix_timestamp,
    });
    Ok(())
}
