//! Swap Task
//!
//! Exact-input single-pool swap through the V3 router, in either direction.
//! The quoter is asked first for narration only; its answer never gates the swap.

use crate::config::NEWO_DECIMALS;
use crate::contracts::{IQuoter, ISwapRouter};
use crate::tasks::format_hash;
use crate::tasks::prelude::*;
use alloy_primitives::aliases::{U160, U24};
use alloy_primitives::utils::{format_units, parse_units};
use alloy_primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub const SWAP_DEADLINE_SECS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    UsdcToNewo,
    NewoToUsdc,
}

impl SwapDirection {
    /// `(token_in, token_out)`
    pub fn tokens(&self, market: &Market) -> (Address, Address) {
        match self {
            Self::UsdcToNewo => (market.tokens.usdc, market.tokens.newo),
            Self::NewoToUsdc => (market.tokens.newo, market.tokens.usdc),
        }
    }

    /// `(symbol_in, symbol_out)`
    pub fn symbols(&self) -> (&'static str, &'static str) {
        match self {
            Self::UsdcToNewo => ("USDC", "NEWO"),
            Self::NewoToUsdc => ("NEWO", "USDC"),
        }
    }

    /// Decimals of `(token_in, token_out)`
    pub fn decimals(&self, usdc_decimals: u8) -> (u8, u8) {
        match self {
            Self::UsdcToNewo => (usdc_decimals, NEWO_DECIMALS),
            Self::NewoToUsdc => (NEWO_DECIMALS, usdc_decimals),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwapTask {
    pub direction: SwapDirection,
}

impl SwapTask {
    pub fn new(direction: SwapDirection) -> Self {
        Self { direction }
    }

    /// `swap_amount_in` whole tokens of the input token, in base units
    pub fn amount_in(&self, ctx: &TaskContext) -> Result<U256> {
        let (decimals_in, _) = self.direction.decimals(ctx.config.usdc_decimals);
        Ok(parse_units(&ctx.config.swap_amount_in, decimals_in)?.get_absolute())
    }
}

pub fn swap_params(
    token_in: Address,
    token_out: Address,
    fee: U24,
    recipient: Address,
    amount_in: U256,
    deadline: U256,
) -> ISwapRouter::ExactInputSingleParams {
    ISwapRouter::ExactInputSingleParams {
        tokenIn: token_in,
        tokenOut: token_out,
        fee,
        recipient,
        deadline,
        amountIn: amount_in,
        amountOutMinimum: U256::ZERO,
        sqrtPriceLimitX96: U160::ZERO,
    }
}

#[async_trait]
impl Task<TaskContext> for SwapTask {
    fn name(&self) -> &'static str {
        match self.direction {
            SwapDirection::UsdcToNewo => "03_swap_usdc_to_newo",
            SwapDirection::NewoToUsdc => "03_swap_newo_to_usdc",
        }
    }

    async fn run(&self, ctx: &TaskContext) -> Result<TaskResult> {
        let client = &ctx.client;
        let market = ctx.market()?;
        let router = ctx.config.addresses.swap_router;
        let (token_in, token_out) = self.direction.tokens(market);
        let (symbol_in, symbol_out) = self.direction.symbols();
        let (_, decimals_out) = self.direction.decimals(ctx.config.usdc_decimals);
        let amount_in = self.amount_in(ctx)?;

        info!(
            "Swapping {} {} to {}...",
            ctx.config.swap_amount_in, symbol_in, symbol_out
        );

        let quote_call = IQuoter::quoteExactInputSingleCall {
            tokenIn: token_in,
            tokenOut: token_out,
            fee: market.data.fee_tier(),
            amountIn: amount_in,
            sqrtPriceLimitX96: U160::ZERO,
        };
        match client.call(ctx.config.addresses.quoter, &quote_call).await {
            Ok(expected) => info!(
                "Quoter expects {} {}",
                format_units(expected, decimals_out).unwrap_or_else(|_| expected.to_string()),
                symbol_out
            ),
            Err(e) => debug!("Quote unavailable: {:#}", e),
        }

        ctx.ensure_allowance(token_in, router, amount_in).await?;

        let params = swap_params(
            token_in,
            token_out,
            market.data.fee_tier(),
            ctx.address(),
            amount_in,
            deadline(SWAP_DEADLINE_SECS),
        );
        let tx = client.call_request(router, &ISwapRouter::exactInputSingleCall { params });

        let estimated = client.estimate_gas(&tx).await?;
        let quote = ctx.quote().await;
        if !quote.is_available() {
            warn!("No EIP-1559 fee data, swap skipped");
            return Ok(TaskResult::skipped("swap skipped: no fee quote"));
        }
        let balance = client.balance().await?;
        let action = format!("swapping {} to {}", symbol_in, symbol_out);
        quote.ensure_affordable(balance, estimated, &action)?;

        let receipt = client.send(quote.apply(tx), &action).await?;

        Ok(TaskResult::ok(
            format!(
                "Swapped {} {} to {}",
                ctx.config.swap_amount_in, symbol_in, symbol_out
            ),
            Some(format_hash(receipt.transaction_hash)),
        ))
    }
}
