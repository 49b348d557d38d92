//! Uniswap V3 pool access: snapshot reads and pool creation.

use crate::client::SeederClient;
use crate::contracts::{INonfungiblePositionManager, IUniswapV3Factory, IUniswapV3Pool};
use crate::error::SeedError;
use crate::math::{self, MathError, MAX_SQRT_RATIO, MIN_SQRT_RATIO};
use alloy_primitives::aliases::{U160, U24};
use alloy_primitives::{Address, U256};
use anyhow::Result;
use core_logic::{with_retry, RetryConfig};
use tracing::debug;

/// Latest read of the pool's state.
///
/// Nothing keeps it fresh; callers re-read between steps that move the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolData {
    pub tick_spacing: i32,
    pub fee: u32,
    pub liquidity: u128,
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

impl PoolData {
    pub fn fee_tier(&self) -> U24 {
        U24::from(self.fee)
    }

    /// Human price of token0 in token1
    pub fn price(&self, decimals0: u8, decimals1: u8) -> f64 {
        math::tick_to_price(self.tick, decimals0, decimals1)
    }
}

/// Reads `tickSpacing`, `fee`, `liquidity` and `slot0` concurrently.
///
/// Transient RPC failures retry the whole snapshot so the four values come
/// from the same attempt.
pub async fn get_pool_data(client: &SeederClient, pool: Address) -> Result<PoolData> {
    let retry = RetryConfig::new(3, 500).transient_only();
    with_retry(retry, "pool data read", move || async move {
        let (tick_spacing, fee, liquidity, slot0) = tokio::try_join!(
            client.call(pool, &IUniswapV3Pool::tickSpacingCall {}),
            client.call(pool, &IUniswapV3Pool::feeCall {}),
            client.call(pool, &IUniswapV3Pool::liquidityCall {}),
            client.call(pool, &IUniswapV3Pool::slot0Call {}),
        )?;

        Ok(PoolData {
            tick_spacing: tick_spacing.as_i32(),
            fee: fee.to::<u32>(),
            liquidity,
            sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
            tick: slot0.tick.as_i32(),
        })
    })
    .await
}

/// Orders two token addresses the way Uniswap pools do
pub fn sort_tokens(a: Address, b: Address) -> (Address, Address) {
    if a < b { (a, b) } else { (b, a) }
}

/// Initial `sqrtPriceX96` for a NEWO/USDC pool.
///
/// `usdc_per_newo` is the raw USDC amount worth one whole NEWO; the ratio is
/// flipped when USDC sorts first.
pub fn initial_sqrt_price(
    token0: Address,
    newo: Address,
    usdc_per_newo: U256,
) -> Result<U256, MathError> {
    let one_newo = U256::from(10u64).pow(U256::from(crate::config::NEWO_DECIMALS));
    let sqrt_price = if token0 == newo {
        math::encode_sqrt_ratio_x96(usdc_per_newo, one_newo)?
    } else {
        math::encode_sqrt_ratio_x96(one_newo, usdc_per_newo)?
    };

    if sqrt_price < MIN_SQRT_RATIO || sqrt_price >= MAX_SQRT_RATIO {
        return Err(MathError::SqrtRatioOutOfRange { ratio: sqrt_price });
    }
    Ok(sqrt_price)
}

/// Factory lookup; `None` when no pool exists for the pair and fee
pub async fn find_pool(
    client: &SeederClient,
    factory: Address,
    token_a: Address,
    token_b: Address,
    fee: u32,
) -> Result<Option<Address>> {
    let (token0, token1) = sort_tokens(token_a, token_b);
    let pool = client
        .call(
            factory,
            &IUniswapV3Factory::getPoolCall {
                tokenA: token0,
                tokenB: token1,
                fee: U24::from(fee),
            },
        )
        .await?;
    Ok((!pool.is_zero()).then_some(pool))
}

/// Creates and initializes the pool through the position manager, then resolves
/// its address from the factory.
pub async fn create_pool(
    client: &SeederClient,
    position_manager: Address,
    factory: Address,
    token_a: Address,
    token_b: Address,
    fee: u32,
    sqrt_price_x96: U256,
) -> Result<Address> {
    let (token0, token1) = sort_tokens(token_a, token_b);
    let sqrt_price = U160::checked_from_uint(sqrt_price_x96).ok_or(MathError::Overflow)?;

    let call = INonfungiblePositionManager::createAndInitializePoolIfNecessaryCall {
        token0,
        token1,
        fee: U24::from(fee),
        sqrtPriceX96: sqrt_price,
    };
    let receipt = client
        .send_call(position_manager, &call, "create pool")
        .await?;
    debug!("Pool creation tx: {:?}", receipt.transaction_hash);

    find_pool(client, factory, token0, token1, fee)
        .await?
        .ok_or_else(|| {
            SeedError::PoolNotFound {
                token0,
                token1,
                fee,
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, uint};

    const NEWO: Address = address!("92FedF27cFD1c72052d7Ca105A7F5522E4D7403D");
    const USDC: Address = address!("68e9b61253E720aF5ec965A83509Afb6eA882a1D");

    #[test]
    fn test_sort_tokens() {
        assert_eq!(sort_tokens(NEWO, USDC), (USDC, NEWO));
        assert_eq!(sort_tokens(USDC, NEWO), (USDC, NEWO));
    }

    #[test]
    fn test_initial_price_orientation() {
        let tenth = U256::from(10u64).pow(U256::from(17u8));

        // NEWO as token0: price is USDC per NEWO
        let newo_first = initial_sqrt_price(NEWO, NEWO, tenth).unwrap();
        assert_eq!(newo_first, uint!(25054144837504793118641380156_U256));
        assert_eq!(math::get_tick_at_sqrt_ratio(newo_first).unwrap(), -23028);

        // USDC as token0: price is NEWO per USDC
        let usdc_first = initial_sqrt_price(USDC, NEWO, tenth).unwrap();
        assert_eq!(usdc_first, uint!(250541448375047931186413801569_U256));
    }

    #[test]
    fn test_zero_price_rejected() {
        assert!(matches!(
            initial_sqrt_price(NEWO, NEWO, U256::ZERO),
            Err(MathError::SqrtRatioOutOfRange { .. })
        ));
        assert_eq!(
            initial_sqrt_price(USDC, NEWO, U256::ZERO),
            Err(MathError::DivisionByZero)
        );
    }

    #[test]
    fn test_pool_data_price() {
        let data = PoolData {
            tick_spacing: 60,
            fee: 3000,
            liquidity: 0,
            sqrt_price_x96: math::Q96,
            tick: 0,
        };
        assert_eq!(data.fee_tier(), U24::from(3000u32));
        assert!((data.price(18, 18) - 1.0).abs() < 1e-12);
    }
}
