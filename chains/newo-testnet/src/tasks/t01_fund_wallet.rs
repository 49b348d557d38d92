//! Fund Wallet Task
//!
//! Sends the native seed, NEWO and USDC from the deployer to a generated
//! wallet, each transfer awaited to inclusion before the next.

use crate::config::NEWO_DECIMALS;
use crate::contracts::IERC20;
use crate::tasks::format_hash;
use crate::tasks::prelude::*;
use alloy::rpc::types::TransactionRequest;
use alloy_primitives::Address;
use alloy_primitives::utils::{format_ether, parse_units};
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Whole NEWO sent to each wallet
pub const FUND_NEWO: &str = "100000";
/// Whole USDC sent to each wallet
pub const FUND_USDC: &str = "10000";

#[derive(Debug, Clone)]
pub struct FundWalletTask {
    pub recipient: Address,
}

impl FundWalletTask {
    pub fn new(recipient: Address) -> Self {
        Self { recipient }
    }
}

#[async_trait]
impl Task<TaskContext> for FundWalletTask {
    fn name(&self) -> &'static str {
        "01_fund_wallet"
    }

    async fn run(&self, ctx: &TaskContext) -> Result<TaskResult> {
        let client = &ctx.client;
        let tokens = ctx.market()?.tokens;

        let native = ctx.config.eth_seed_wei()?;
        let seed_tx = TransactionRequest::default()
            .to(self.recipient)
            .value(native)
            .gas_limit(ctx.gas.limit_native_seed());
        let receipt = client.send(seed_tx, "native seed").await?;
        debug!("Native seed tx: {:?}", receipt.transaction_hash);

        let newo_amount = parse_units(FUND_NEWO, NEWO_DECIMALS)?.get_absolute();
        client
            .send_call(
                tokens.newo,
                &IERC20::transferCall {
                    to: self.recipient,
                    amount: newo_amount,
                },
                "transfer NEWO",
            )
            .await?;

        let usdc_amount = ctx.config.usdc_units(FUND_USDC, "fund_usdc")?;
        let receipt = client
            .send_call(
                tokens.usdc,
                &IERC20::transferCall {
                    to: self.recipient,
                    amount: usdc_amount,
                },
                "transfer USDC",
            )
            .await?;

        Ok(TaskResult::ok(
            format!(
                "Seeded {} with {} ETH, {} NEWO, {} USDC",
                self.recipient,
                format_ether(native),
                FUND_NEWO,
                FUND_USDC
            ),
            Some(format_hash(receipt.transaction_hash)),
        ))
    }
}
