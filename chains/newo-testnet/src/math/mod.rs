//! Concentrated-liquidity math for Uniswap V3 pools.
//!
//! Integer results are bit-exact with the on-chain libraries (`TickMath`,
//! `FullMath`, `SqrtPriceMath`) and the v3 SDK helpers built on them.

pub mod full_math;
pub mod liquidity;
pub mod sqrt_price;
pub mod tick_math;

use alloy_primitives::{U256, uint};
use thiserror::Error;

pub use full_math::{mul_div, mul_div_rounding_up};
pub use liquidity::mint_amounts;
pub use sqrt_price::{encode_sqrt_ratio_x96, get_amount0_delta, get_amount1_delta};
pub use tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, nearest_usable_tick, position_range,
    tick_to_price,
};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = 887272;

pub const MIN_SQRT_RATIO: U256 = uint!(4295128739_U256);
pub const MAX_SQRT_RATIO: U256 = uint!(1461446703485210103287273052203988822378723970342_U256);

/// 2^96, the fixed-point scale of `sqrtPriceX96`
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Tick {tick} outside [{MIN_TICK}, {MAX_TICK}]")]
    TickOutOfRange { tick: i32 },

    #[error("Sqrt ratio {ratio} outside [MIN_SQRT_RATIO, MAX_SQRT_RATIO)")]
    SqrtRatioOutOfRange { ratio: U256 },

    #[error("Tick spacing must be positive, got {spacing}")]
    InvalidTickSpacing { spacing: i32 },

    #[error("Invalid tick range: lower {lower} must be below upper {upper}")]
    InvalidTickRange { lower: i32, upper: i32 },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result does not fit in 256 bits")]
    Overflow,
}
