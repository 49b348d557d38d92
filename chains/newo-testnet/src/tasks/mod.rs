//! Tasks Module - per-wallet actions of the seeding and recovery pipelines
//!
//! Every action a wallet performs is a [`SeedTask`] run against a
//! [`TaskContext`]. The context carries the acting wallet's client, the loaded
//! configuration and, for pool-related actions, the [`Market`] being seeded.
//!
//! # Task Lifecycle
//!
//! 1. The binary builds a context for the acting wallet (the deployer when
//!    funding, the generated wallet otherwise)
//! 2. Tasks run strictly in sequence, one wallet at a time
//! 3. Each task returns a [`TaskResult`]; a skipped action is not an error
//! 4. Errors propagate and end the run, except in recovery where they are
//!    logged per wallet
//!
//! # Tasks
//!
//! - [`t01_fund_wallet`]: native currency, NEWO and USDC from the deployer
//! - [`t02_provide_liquidity`]: concentrated position around the current tick
//! - [`t03_swap`]: `exactInputSingle` in either direction
//! - [`t04_lock_venewo`]: NEWO deposit into VeNewO
//! - [`t05_sweep_wallet`]: native balance minus gas back to the deployer

use crate::client::SeederClient;
use crate::config::{NEWO_DECIMALS, SeederConfig};
use crate::contracts::IERC20;
use crate::deploy::TokenSet;
use crate::gas::GasQuote;
use crate::math::MathError;
use crate::pool::PoolData;
use alloy_primitives::aliases::I24;
use alloy_primitives::{Address, B256, U256, uint};
use anyhow::{Context, Result};
use core_logic::{GasConfig, Task};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

pub use core_logic::TaskResult;

/// Allowance granted whenever an approval is needed (1e9 tokens at 18 decimals)
pub const APPROVAL_AMOUNT: U256 = uint!(1_000_000_000_000_000_000_000_000_000_U256);

/// Tokens and pool a seeding run works against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Market {
    pub tokens: TokenSet,
    pub pool: Address,
    pub data: PoolData,
}

impl Market {
    /// Current pool price of one NEWO in USDC
    pub fn usdc_per_newo(&self, usdc_decimals: u8) -> f64 {
        if self.tokens.newo < self.tokens.usdc {
            self.data.price(NEWO_DECIMALS, usdc_decimals)
        } else {
            1.0 / self.data.price(usdc_decimals, NEWO_DECIMALS)
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskContext {
    /// Client of the wallet performing the task
    pub client: SeederClient,
    pub config: Arc<SeederConfig>,
    pub gas: GasConfig,
    /// Absent for tasks that never touch the pool (recovery)
    pub market: Option<Market>,
}

impl TaskContext {
    pub fn new(client: SeederClient, config: Arc<SeederConfig>) -> Self {
        let gas = config.gas_config();
        Self {
            client,
            config,
            gas,
            market: None,
        }
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    /// Replaces the pool snapshot after a fresh read
    pub fn refresh_pool(&mut self, data: PoolData) {
        if let Some(market) = self.market.as_mut() {
            market.data = data;
        }
    }

    #[inline]
    pub fn address(&self) -> Address {
        self.client.address()
    }

    pub fn market(&self) -> Result<&Market> {
        self.market
            .as_ref()
            .context("Task needs a market but the context has none")
    }

    pub async fn quote(&self) -> GasQuote {
        GasQuote::fetch(self.client.provider(), &self.gas).await
    }

    /// Approves `spender` for [`APPROVAL_AMOUNT`] unless the current allowance covers `amount`.
    ///
    /// Returns the approval transaction hash when one was sent.
    pub async fn ensure_allowance(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<Option<B256>> {
        let owner = self.address();
        let allowance = self
            .client
            .call(token, &IERC20::allowanceCall { owner, spender })
            .await?;
        if allowance >= amount {
            debug!("Allowance of {} on {} already covers {}", spender, token, amount);
            return Ok(None);
        }

        let receipt = self
            .client
            .send_call(
                token,
                &IERC20::approveCall {
                    spender,
                    amount: APPROVAL_AMOUNT,
                },
                "approve",
            )
            .await?;
        Ok(Some(receipt.transaction_hash))
    }
}

/// Task run against a [`TaskContext`]
pub trait SeedTask: Task<TaskContext> {}

impl<T: Task<TaskContext>> SeedTask for T {}

/// Unix timestamp `secs` from now
pub fn deadline(secs: u64) -> U256 {
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    U256::from(now + secs)
}

/// Runs `task` and logs one result line for it.
///
/// Errors are logged as a FAILED line and then returned to the caller.
pub async fn run_logged<T>(task: &T, ctx: &TaskContext, wallet_idx: usize) -> Result<TaskResult>
where
    T: SeedTask + ?Sized,
{
    let start = Instant::now();
    match task.run(ctx).await {
        Ok(result) => {
            let status_msg = match (&result.tx_hash, result.success) {
                (Some(tx_hash), true) => format!("{} TxHash: {}", result.message, tx_hash),
                _ => result.message.clone(),
            };
            info!(
                target: "task_result",
                "[WL:{:03}] {} [{}] {} t:{:.1}s",
                wallet_idx + 1,
                if result.success { "SUCCESS" } else { "SKIPPED" },
                task.name(),
                status_msg,
                start.elapsed().as_secs_f32()
            );
            Ok(result)
        }
        Err(e) => {
            error!(
                target: "task_result",
                "[WL:{:03}] FAILED  [{}] {:#} t:{:.1}s",
                wallet_idx + 1,
                task.name(),
                e,
                start.elapsed().as_secs_f32()
            );
            Err(e)
        }
    }
}

pub(crate) fn tick_i24(tick: i32) -> Result<I24, MathError> {
    I24::try_from(tick).map_err(|_| MathError::TickOutOfRange { tick })
}

pub(crate) fn format_hash(hash: B256) -> String {
    format!("{:?}", hash)
}

pub mod prelude {
    pub use super::{Market, SeedTask, TaskContext, TaskResult, deadline, run_logged};
    pub use core_logic::Task;
}

pub mod t01_fund_wallet;
pub mod t02_provide_liquidity;
pub mod t03_swap;
pub mod t04_lock_venewo;
pub mod t05_sweep_wallet;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_in_future() {
        let now = chrono::Utc::now().timestamp() as u64;
        let d = deadline(600).to::<u64>();
        assert!(d >= now + 600 && d <= now + 602);
    }

    #[test]
    fn test_tick_conversion() {
        assert_eq!(tick_i24(-120).unwrap().as_i32(), -120);
        assert_eq!(tick_i24(887_272).unwrap().as_i32(), 887_272);
        assert_eq!(
            tick_i24(1 << 23),
            Err(MathError::TickOutOfRange { tick: 1 << 23 })
        );
    }

    fn market(newo: Address, usdc: Address, tick: i32) -> Market {
        Market {
            tokens: TokenSet {
                newo,
                usdc,
                venewo: Address::ZERO,
            },
            pool: Address::ZERO,
            data: PoolData {
                tick_spacing: 60,
                fee: 3000,
                liquidity: 0,
                sqrt_price_x96: U256::ZERO,
                tick,
            },
        }
    }

    #[test]
    fn test_usdc_per_newo_follows_token_order() {
        let low = Address::with_last_byte(1);
        let high = Address::with_last_byte(2);

        // NEWO is token0: the pool price is already USDC per NEWO
        let price = market(low, high, -23028).usdc_per_newo(18);
        assert!((price - 0.1).abs() < 1e-4, "{price}");

        // NEWO is token1: the pool price is NEWO per USDC
        let price = market(high, low, 23028).usdc_per_newo(18);
        assert!((price - 0.1).abs() < 1e-4, "{price}");

        // 6-decimal USDC scales the human price, not the tick
        let price = market(low, high, -299_336).usdc_per_newo(6);
        assert!((price - 0.1).abs() < 1e-3, "{price}");
    }

    #[test]
    fn test_approval_amount() {
        assert_eq!(
            APPROVAL_AMOUNT,
            U256::from(1_000_000_000u64) * U256::from(10u64).pow(U256::from(18u8))
        );
    }
}
