use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::state::{held_balance, Lottery, LotterySummary};

/// Read-only access to the lottery for the query instructions.
#[derive(Accounts)]
pub struct ReadLottery<'info> {
    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,
}

/// Returns the player at `index` in the current round.
pub fn process_get_player(ctx: Context<ReadLottery>, index: u64) -> Result<Pubkey> {
    ctx.accounts.lottery.player(index)
}

pub fn process_get_summary(ctx: Context<ReadLottery>) -> Result<LotterySummary> {
    let rent = Rent::get()?;
    let lottery = &ctx.accounts.lottery;
    let pot = held_balance(&lottery.to_account_info(), &rent);

    Ok(lottery.summary(pot))
}
