//! Sqrt-price encoding and token amount deltas between two prices.

use super::full_math::{div_rounding_up, mul_div, mul_div_rounding_up, narrow};
use super::{MathError, Q96};
use alloy_primitives::{U256, U512};

/// `sqrt(amount1 / amount0) * 2^96`, floored.
pub fn encode_sqrt_ratio_x96(amount1: U256, amount0: U256) -> Result<U256, MathError> {
    if amount0.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let ratio_x192 = (U512::from(amount1) << 192) / U512::from(amount0);
    narrow(isqrt(ratio_x192))
}

fn isqrt(n: U512) -> U512 {
    if n < U512::from(2u8) {
        return n;
    }
    // start above the root so Newton descends monotonically
    let mut x = U512::from(1u8) << (n.bit_len() / 2 + 1);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Token0 needed for `liquidity` between two sqrt prices.
pub fn get_amount0_delta(
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    let (lower, upper) = if sqrt_ratio_a > sqrt_ratio_b {
        (sqrt_ratio_b, sqrt_ratio_a)
    } else {
        (sqrt_ratio_a, sqrt_ratio_b)
    };
    if lower.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let numerator1 = U256::from(liquidity) << 96;
    let numerator2 = upper - lower;

    if round_up {
        div_rounding_up(mul_div_rounding_up(numerator1, numerator2, upper)?, lower)
    } else {
        Ok(mul_div(numerator1, numerator2, upper)? / lower)
    }
}

/// Token1 needed for `liquidity` between two sqrt prices.
pub fn get_amount1_delta(
    sqrt_ratio_a: U256,
    sqrt_ratio_b: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    let (lower, upper) = if sqrt_ratio_a > sqrt_ratio_b {
        (sqrt_ratio_b, sqrt_ratio_a)
    } else {
        (sqrt_ratio_a, sqrt_ratio_b)
    };

    if round_up {
        mul_div_rounding_up(U256::from(liquidity), upper - lower, Q96)
    } else {
        mul_div(U256::from(liquidity), upper - lower, Q96)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::get_sqrt_ratio_at_tick;
    use alloy_primitives::uint;

    #[test]
    fn test_encode_sqrt_ratio_vectors() {
        let one = U256::from(1u8);
        let hundred = U256::from(100u8);

        assert_eq!(encode_sqrt_ratio_x96(one, one).unwrap(), Q96);
        assert_eq!(
            encode_sqrt_ratio_x96(hundred, one).unwrap(),
            uint!(792281625142643375935439503360_U256)
        );
        assert_eq!(
            encode_sqrt_ratio_x96(one, hundred).unwrap(),
            uint!(7922816251426433759354395033_U256)
        );
        assert_eq!(
            encode_sqrt_ratio_x96(U256::from(111u16), U256::from(333u16)).unwrap(),
            uint!(45742400955009932534161870629_U256)
        );
        assert_eq!(
            encode_sqrt_ratio_x96(U256::from(333u16), U256::from(111u16)).unwrap(),
            uint!(137227202865029797602485611888_U256)
        );
    }

    #[test]
    fn test_encode_sqrt_ratio_zero_denominator() {
        assert_eq!(
            encode_sqrt_ratio_x96(U256::from(1u8), U256::ZERO),
            Err(MathError::DivisionByZero)
        );
    }

    #[test]
    fn test_isqrt_small_values() {
        for (n, root) in [(0u64, 0u64), (1, 1), (3, 1), (4, 2), (15, 3), (16, 4), (17, 4)] {
            assert_eq!(isqrt(U512::from(n)), U512::from(root));
        }
    }

    #[test]
    fn test_amount_deltas_round_direction() {
        let lower = get_sqrt_ratio_at_tick(-120).unwrap();
        let upper = get_sqrt_ratio_at_tick(120).unwrap();
        let liquidity = 10u128.pow(16);

        let down0 = get_amount0_delta(lower, upper, liquidity, false).unwrap();
        let up0 = get_amount0_delta(lower, upper, liquidity, true).unwrap();
        assert_eq!(down0, U256::from(119994720293278u64));
        assert_eq!(up0, down0 + U256::from(1u8));

        let down1 = get_amount1_delta(upper, lower, liquidity, false).unwrap();
        let up1 = get_amount1_delta(lower, upper, liquidity, true).unwrap();
        assert_eq!(down1, U256::from(119994720293278u64));
        assert_eq!(up1, U256::from(119994720293279u64));
    }

    #[test]
    fn test_amount_deltas_empty_range() {
        let price = get_sqrt_ratio_at_tick(0).unwrap();
        assert!(get_amount0_delta(price, price, 1_000, true).unwrap().is_zero());
        assert!(get_amount1_delta(price, price, 1_000, true).unwrap().is_zero());
    }
}
