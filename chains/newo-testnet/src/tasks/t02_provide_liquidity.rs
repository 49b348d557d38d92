//! Provide Liquidity Task
//!
//! Mints a concentrated position two tick spacings either side of the usable
//! tick nearest the current price.

use crate::contracts::INonfungiblePositionManager;
use crate::math::{mint_amounts, position_range};
use crate::pool::{PoolData, sort_tokens};
use crate::tasks::prelude::*;
use crate::tasks::{format_hash, tick_i24};
use alloy_primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Liquidity minted per wallet (0.01e18)
pub const POSITION_LIQUIDITY: u128 = 10_000_000_000_000_000;
/// Tick spacings on each side of the current usable tick
pub const RANGE_WIDTH: i32 = 2;
pub const MINT_DEADLINE_SECS: u64 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionPlan {
    pub token0: Address,
    pub token1: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0: U256,
    pub amount1: U256,
}

impl PositionPlan {
    pub fn new(newo: Address, usdc: Address, data: &PoolData) -> Result<Self> {
        let (token0, token1) = sort_tokens(newo, usdc);
        let (tick_lower, tick_upper) = position_range(data.tick, data.tick_spacing, RANGE_WIDTH)?;
        let (amount0, amount1) = mint_amounts(
            data.sqrt_price_x96,
            data.tick,
            tick_lower,
            tick_upper,
            POSITION_LIQUIDITY,
        )?;
        Ok(Self {
            token0,
            token1,
            tick_lower,
            tick_upper,
            amount0,
            amount1,
        })
    }

    pub fn mint_params(
        &self,
        data: &PoolData,
        recipient: Address,
        deadline: U256,
    ) -> Result<INonfungiblePositionManager::MintParams> {
        Ok(INonfungiblePositionManager::MintParams {
            token0: self.token0,
            token1: self.token1,
            fee: data.fee_tier(),
            tickLower: tick_i24(self.tick_lower)?,
            tickUpper: tick_i24(self.tick_upper)?,
            amount0Desired: self.amount0,
            amount1Desired: self.amount1,
            amount0Min: U256::ZERO,
            amount1Min: U256::ZERO,
            recipient,
            deadline,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProvideLiquidityTask;

impl ProvideLiquidityTask {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Task<TaskContext> for ProvideLiquidityTask {
    fn name(&self) -> &'static str {
        "02_provide_liquidity"
    }

    async fn run(&self, ctx: &TaskContext) -> Result<TaskResult> {
        let client = &ctx.client;
        let market = ctx.market()?;
        let position_manager = ctx.config.addresses.position_manager;

        let plan = PositionPlan::new(market.tokens.newo, market.tokens.usdc, &market.data)?;
        debug!(
            "Position [{}, {}] needs {} token0 / {} token1",
            plan.tick_lower, plan.tick_upper, plan.amount0, plan.amount1
        );

        info!("Approving liquidity to pool...");
        ctx.ensure_allowance(plan.token0, position_manager, plan.amount0)
            .await?;
        ctx.ensure_allowance(plan.token1, position_manager, plan.amount1)
            .await?;

        let params = plan.mint_params(&market.data, ctx.address(), deadline(MINT_DEADLINE_SECS))?;
        debug!("LP params: {:?}", params);
        let tx = client.call_request(
            position_manager,
            &INonfungiblePositionManager::mintCall { params },
        );

        info!("Estimating gas cost of minting lp position...");
        let estimated = client.estimate_gas(&tx).await?;
        let quote = ctx.quote().await;
        if !quote.is_available() {
            warn!("No EIP-1559 fee data, mint skipped");
            return Ok(TaskResult::skipped("mint skipped: no fee quote"));
        }
        let balance = client.balance().await?;
        quote.ensure_affordable(balance, estimated, "minting LP position")?;

        info!("Providing liquidity to pool...");
        let tx = quote
            .apply(tx)
            .gas_limit(ctx.gas.limit_mint_position());
        let receipt = client.send(tx, "mint position").await?;

        Ok(TaskResult::ok(
            format!(
                "Position minted in [{}, {}]",
                plan.tick_lower, plan.tick_upper
            ),
            Some(format_hash(receipt.transaction_hash)),
        ))
    }
}
