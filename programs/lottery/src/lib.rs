use anchor_lang::prelude::*;
use instructions::*;
use state::{LotteryConfig, LotterySummary, UpkeepCheck};

/// Program-wide constants: PDA seeds, round capacity and oracle limits.
pub mod constants;

/// Custom error types returned when instructions fail.
pub mod error;

/// Events emitted for off-chain subscribers.
pub mod events;

/// Instruction handlers: setup, entry, upkeep, fulfillment and queries.
pub mod instructions;

/// Switchboard randomness adapter and winner selection.
pub mod randomness;

/// The `Lottery` account and its round state machine.
pub mod state;

declare_id!("6Pn4KHRUHVdZjSkjSEVrCpwJUMHFaJP71NPkkQaFuX9a");

#[program]
pub mod lottery {
    use super::*;

    pub fn initialize_lottery(
        ctx: Context<InitializeLottery>,
        config: LotteryConfig,
    ) -> Result<()> {
        process_initialize_lottery(ctx, config)
    }

    pub fn enter_lottery(ctx: Context<EnterLottery>, payment: u64) -> Result<()> {
        process_enter_lottery(ctx, payment)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepCheck> {
        process_check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        process_perform_upkeep(ctx, perform_data)
    }

    pub fn fulfill_randomness(ctx: Context<FulfillRandomness>) -> Result<()> {
        process_fulfill_randomness(ctx)
    }

    pub fn cancel_stale_draw(ctx: Context<CancelStaleDraw>) -> Result<()> {
        process_cancel_stale_draw(ctx)
    }

    pub fn get_player(ctx: Context<ReadLottery>, index: u64) -> Result<Pubkey> {
        process_get_player(ctx, index)
    }

    pub fn get_summary(ctx: Context<ReadLottery>) -> Result<LotterySummary> {
        process_get_summary(ctx)
    }
}
