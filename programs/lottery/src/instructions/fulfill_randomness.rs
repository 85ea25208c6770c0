use anchor_lang::prelude::*;

use crate::constants::{LOTTERY_SEED, SWITCHBOARD_PROGRAM_ID};
use crate::error::ErrorCode;
use crate::events::WinnerPicked;
use crate::randomness;
use crate::state::{held_balance, Lottery, LotteryState};

/// Accounts required to settle a round with revealed randomness.
///
/// Ensures:
/// 1. The lottery is waiting for randomness.
/// 2. The randomness account is the outstanding request and has been revealed.
/// 3. The winner account is the player drawn from that randomness.
#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    /// Account paying for the transaction fees.
    pub payer: Signer<'info>,

    /// The lottery state account, holding the pot.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        constraint = lottery.state == LotteryState::Calculating @ ErrorCode::RoundNotCalculating,
    )]
    pub lottery: Account<'info, Lottery>,

    /// The revealed randomness oracle account.
    /// CHECK: Owner is checked here; the data is validated within the handler.
    #[account(owner = SWITCHBOARD_PROGRAM_ID @ ErrorCode::InvalidRandomnessAccount)]
    pub randomness_account_data: UncheckedAccount<'info>,

    /// Receives the pot.
    /// CHECK: Compared against the drawn player within the handler.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Picks the winner, pays out the whole pot and opens the next round.
///
/// The round is only reset after the payout succeeded; any failure aborts
/// the transaction and leaves the request outstanding.
pub fn process_fulfill_randomness(ctx: Context<FulfillRandomness>) -> Result<()> {
    let clock = Clock::get()?;
    let rent = Rent::get()?;

    let revealed = randomness::read_reveal(&ctx.accounts.randomness_account_data, &clock)?;
    let winner = ctx.accounts.lottery.select_winner(&revealed)?;
    require_keys_eq!(
        ctx.accounts.winner.key(),
        winner,
        ErrorCode::WinnerAccountMismatch
    );

    let lottery_info = ctx.accounts.lottery.to_account_info();
    let prize = held_balance(&lottery_info, &rent);
    pay_out(&lottery_info, &ctx.accounts.winner, prize)?;

    ctx.accounts.lottery.close_round(winner, clock.unix_timestamp);

    msg!("Winner: {}", winner);
    msg!("Prize: {}", prize);
    emit!(WinnerPicked { winner, prize });
    Ok(())
}

fn pay_out(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    let from_balance = from
        .lamports()
        .checked_sub(amount)
        .ok_or(ErrorCode::PayoutFailed)?;
    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(ErrorCode::PayoutFailed)?;

    **from
        .try_borrow_mut_lamports()
        .map_err(|_| ErrorCode::PayoutFailed)? = from_balance;
    **to
        .try_borrow_mut_lamports()
        .map_err(|_| ErrorCode::PayoutFailed)? = to_balance;
    Ok(())
}
