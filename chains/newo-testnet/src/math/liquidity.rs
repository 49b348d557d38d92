use super::sqrt_price::{get_amount0_delta, get_amount1_delta};
use super::tick_math::get_sqrt_ratio_at_tick;
use super::MathError;
use alloy_primitives::U256;

/// Token amounts required to mint `liquidity` over `[tick_lower, tick_upper)`
/// at the current pool price, both rounded up.
///
/// Below the range only token0 is needed, at or above the upper tick only
/// token1, and inside the range both.
pub fn mint_amounts(
    sqrt_price_x96: U256,
    tick_current: i32,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
) -> Result<(U256, U256), MathError> {
    if tick_lower >= tick_upper {
        return Err(MathError::InvalidTickRange {
            lower: tick_lower,
            upper: tick_upper,
        });
    }

    let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper)?;

    if tick_current < tick_lower {
        let amount0 = get_amount0_delta(sqrt_lower, sqrt_upper, liquidity, true)?;
        Ok((amount0, U256::ZERO))
    } else if tick_current < tick_upper {
        let amount0 = get_amount0_delta(sqrt_price_x96, sqrt_upper, liquidity, true)?;
        let amount1 = get_amount1_delta(sqrt_lower, sqrt_price_x96, liquidity, true)?;
        Ok((amount0, amount1))
    } else {
        let amount1 = get_amount1_delta(sqrt_lower, sqrt_upper, liquidity, true)?;
        Ok((U256::ZERO, amount1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Q96;

    const LIQUIDITY: u128 = 10_000_000_000_000_000;

    #[test]
    fn test_inside_range_needs_both() {
        let (a0, a1) = mint_amounts(Q96, 0, -120, 120, LIQUIDITY).unwrap();
        assert_eq!(a0, U256::from(59817377605097u64));
        assert_eq!(a1, U256::from(59817377605097u64));
    }

    #[test]
    fn test_below_range_only_token0() {
        let price = get_sqrt_ratio_at_tick(-300).unwrap();
        let (a0, a1) = mint_amounts(price, -300, -120, 120, LIQUIDITY).unwrap();
        assert_eq!(a0, U256::from(119994720293279u64));
        assert!(a1.is_zero());
    }

    #[test]
    fn test_at_or_above_upper_only_token1() {
        for tick in [120, 300] {
            let price = get_sqrt_ratio_at_tick(tick).unwrap();
            let (a0, a1) = mint_amounts(price, tick, -120, 120, LIQUIDITY).unwrap();
            assert!(a0.is_zero());
            assert_eq!(a1, U256::from(119994720293279u64));
        }
    }

    #[test]
    fn test_rejects_inverted_range() {
        assert_eq!(
            mint_amounts(Q96, 0, 120, -120, LIQUIDITY),
            Err(MathError::InvalidTickRange {
                lower: 120,
                upper: -120
            })
        );
    }
}
