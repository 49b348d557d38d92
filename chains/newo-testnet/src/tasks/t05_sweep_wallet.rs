//! Sweep Wallet Task
//!
//! Sends a wallet's whole native balance, less the quoted gas for the
//! transfer itself, back to the deployer.

use crate::error::SeedError;
use crate::gas::GasQuote;
use crate::tasks::format_hash;
use crate::tasks::prelude::*;
use alloy::rpc::types::TransactionRequest;
use alloy_primitives::utils::format_ether;
use alloy_primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct SweepWalletTask {
    pub recipient: Address,
}

impl SweepWalletTask {
    pub fn new(recipient: Address) -> Self {
        Self { recipient }
    }
}

/// What a sweep does for a given balance and fee quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepPlan {
    /// Send `amount`, which may be zero once gas is set aside
    Send { amount: U256 },
    NoQuote,
    InsufficientFunds,
}

/// Amount left to send once `cost` is set aside, `None` when the balance cannot cover it
pub fn sweep_amount(balance: U256, cost: U256) -> Option<U256> {
    balance.checked_sub(cost)
}

pub fn sweep_plan(
    quote: &GasQuote,
    balance: U256,
    gas_limit: u64,
) -> Result<SweepPlan, SeedError> {
    plan_from_cost(quote.ensure_affordable(balance, gas_limit, "sweep"), balance)
}

fn plan_from_cost(
    cost: Result<U256, SeedError>,
    balance: U256,
) -> Result<SweepPlan, SeedError> {
    match cost {
        Ok(cost) => Ok(sweep_amount(balance, cost)
            .map_or(SweepPlan::InsufficientFunds, |amount| SweepPlan::Send { amount })),
        Err(SeedError::GasQuoteUnavailable { .. }) => Ok(SweepPlan::NoQuote),
        Err(SeedError::InsufficientGas { .. }) => Ok(SweepPlan::InsufficientFunds),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl Task<TaskContext> for SweepWalletTask {
    fn name(&self) -> &'static str {
        "05_sweep_wallet"
    }

    async fn run(&self, ctx: &TaskContext) -> Result<TaskResult> {
        let client = &ctx.client;
        let balance = client.balance().await?;

        let probe = TransactionRequest::default()
            .from(ctx.address())
            .to(self.recipient)
            .value(balance);
        let gas_limit = client.estimate_gas(&probe).await?;
        let quote = ctx.quote().await;

        let amount = match sweep_plan(&quote, balance, gas_limit)? {
            SweepPlan::Send { amount } => amount,
            SweepPlan::NoQuote => {
                debug!("No fee quote for {}, skipping", ctx.address());
                return Ok(TaskResult::skipped("no fee quote"));
            }
            SweepPlan::InsufficientFunds => {
                info!("Insufficient funds in wallet for current gas price");
                return Ok(TaskResult::skipped("insufficient funds for gas"));
            }
        };
        info!("{}", format_ether(amount));

        let tx = quote.apply(
            TransactionRequest::default()
                .to(self.recipient)
                .value(amount)
                .gas_limit(gas_limit),
        );
        let receipt = client.send(tx, "sweep").await?;

        Ok(TaskResult::ok(
            format!("Swept {} ETH to {}", format_ether(amount), self.recipient),
            Some(format_hash(receipt.transaction_hash)),
        ))
    }
}
