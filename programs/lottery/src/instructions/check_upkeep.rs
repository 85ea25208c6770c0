use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::state::{held_balance, Lottery, UpkeepCheck};

/// Accounts read by the automation eligibility check.
#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,
}

/// Reports whether `perform_upkeep` would draw right now. Meant to be
/// simulated by the automation crank; it writes nothing.
pub fn process_check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepCheck> {
    let clock = Clock::get()?;
    let rent = Rent::get()?;
    let lottery = &ctx.accounts.lottery;
    let pot = held_balance(&lottery.to_account_info(), &rent);

    Ok(UpkeepCheck {
        upkeep_needed: lottery.upkeep_needed(clock.unix_timestamp, pot),
        perform_data: Vec::new(),
    })
}
