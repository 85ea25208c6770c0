use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::LOTTERY_SEED;
use crate::events::EntryRecorded;
use crate::state::Lottery;

/// Accounts required to enter the current round.
#[derive(Accounts)]
pub struct EnterLottery<'info> {
    /// The entrant, paying the entry into the pot.
    #[account(mut)]
    pub player: Signer<'info>,

    /// The lottery state account tracking the current round.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// System program for the lamport transfer.
    pub system_program: Program<'info, System>,
}

/// Enters the caller into the current round.
///
/// Steps performed:
/// 1. Check the payment covers the entry fee and the round is open.
/// 2. Append the caller to the player list.
/// 3. Transfer `payment` lamports from the caller to the lottery pot.
///
/// # Arguments
/// * `ctx` - Context containing EnterLottery accounts
/// * `payment` - Lamports paid, at least the entry fee
pub fn process_enter_lottery(ctx: Context<EnterLottery>, payment: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    ctx.accounts.lottery.record_entry(player, payment)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.lottery.to_account_info(),
            },
        ),
        payment,
    )?;

    msg!(
        "Entry recorded: player={}, payment={}, players={}",
        player,
        payment,
        ctx.accounts.lottery.players.len()
    );
    emit!(EntryRecorded { player, payment });
    Ok(())
}
