//! Lock VeNewO Task
//!
//! Deposits NEWO into the vote-escrow vault so the wallet earns the reward boost.

use crate::contracts::IVeNewO;
use crate::tasks::format_hash;
use crate::tasks::prelude::*;
use alloy_primitives::{U256, uint};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// 1000 NEWO
pub const VENEWO_DEPOSIT: U256 = uint!(1_000_000_000_000_000_000_000_U256);

#[derive(Debug, Clone, Default)]
pub struct LockVeNewoTask;

impl LockVeNewoTask {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Task<TaskContext> for LockVeNewoTask {
    fn name(&self) -> &'static str {
        "04_lock_venewo"
    }

    async fn run(&self, ctx: &TaskContext) -> Result<TaskResult> {
        let tokens = ctx.market()?.tokens;
        info!("Locking up newo into veNewo in the wallet...");

        ctx.ensure_allowance(tokens.newo, tokens.venewo, VENEWO_DEPOSIT)
            .await?;

        let receipt = ctx
            .client
            .send_call(
                tokens.venewo,
                &IVeNewO::depositCall {
                    assets: VENEWO_DEPOSIT,
                    receiver: ctx.address(),
                },
                "veNEWO deposit",
            )
            .await?;

        Ok(TaskResult::ok(
            "Locked 1000 NEWO in veNEWO",
            Some(format_hash(receipt.transaction_hash)),
        ))
    }
}
