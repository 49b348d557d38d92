//! Tick <-> sqrt price conversion and tick-grid helpers.

use super::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, MathError};
use alloy_primitives::U256;

// sqrt(1.0001^-bit) in Q128.128 for every bit of |tick| above the lowest
const RATIO_FACTORS: [(u32, u128); 19] = [
    (0x2, 0xfff97272373d413259a46990580e213a),
    (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
    (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
    (0x10, 0xffcb9843d60f6159c9db58835c926644),
    (0x20, 0xff973b41fa98c081472e6896dfb254c0),
    (0x40, 0xff2ea16466c96a3843ec78b326b52861),
    (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
    (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
    (0x200, 0xf987a7253ac413176f2b074cf7815e54),
    (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
    (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
    (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
    (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
    (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
    (0x8000, 0x31be135f97d08fd981231505542fcfa6),
    (0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9),
    (0x20000, 0x5d6af8dedb81196699c329225ee604),
    (0x40000, 0x2216e584f5fa1ea926041bedfe98),
    (0x80000, 0x48a170391f7dc42444e8fa2),
];

/// `sqrt(1.0001^tick) * 2^96`, rounded up like `TickMath.getSqrtRatioAtTick`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, MathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfRange { tick });
    }

    let abs_tick = tick.unsigned_abs();
    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(0xfffcb933bd6fad37aa2d162d1a594001u128)
    } else {
        U256::from(1u8) << 128
    };

    for (bit, factor) in RATIO_FACTORS {
        if abs_tick & bit != 0 {
            ratio = (ratio * U256::from(factor)) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up
    let shifted = ratio >> 32;
    if (ratio & U256::from(u32::MAX)).is_zero() {
        Ok(shifted)
    } else {
        Ok(shifted + U256::from(1u8))
    }
}

/// Greatest tick whose sqrt ratio is less than or equal to `sqrt_price_x96`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, MathError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(MathError::SqrtRatioOutOfRange {
            ratio: sqrt_price_x96,
        });
    }

    let (mut lo, mut hi) = (MIN_TICK, MAX_TICK);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_price_x96 {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(lo)
}

/// Nearest multiple of `tick_spacing`, halves rounded toward positive infinity.
///
/// A result that falls outside the tick bounds is pulled back by one spacing.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> Result<i32, MathError> {
    if tick_spacing <= 0 {
        return Err(MathError::InvalidTickSpacing {
            spacing: tick_spacing,
        });
    }
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfRange { tick });
    }

    let (tick, spacing) = (i64::from(tick), i64::from(tick_spacing));
    let rounded = (2 * tick + spacing).div_euclid(2 * spacing) * spacing;

    let usable = if rounded < i64::from(MIN_TICK) {
        rounded + spacing
    } else if rounded > i64::from(MAX_TICK) {
        rounded - spacing
    } else {
        rounded
    };
    // always back inside the i32 tick bounds here
    Ok(usable as i32)
}

/// Symmetric range of `width` spacings around the usable tick nearest `tick`.
pub fn position_range(
    tick: i32,
    tick_spacing: i32,
    width: i32,
) -> Result<(i32, i32), MathError> {
    let center = nearest_usable_tick(tick, tick_spacing)?;
    let offset = tick_spacing.saturating_mul(width);
    let lower = center.saturating_sub(offset);
    let upper = center.saturating_add(offset);

    if lower < MIN_TICK {
        return Err(MathError::TickOutOfRange { tick: lower });
    }
    if upper > MAX_TICK {
        return Err(MathError::TickOutOfRange { tick: upper });
    }
    if lower >= upper {
        return Err(MathError::InvalidTickRange { lower, upper });
    }
    Ok((lower, upper))
}

/// Human price of token0 denominated in token1 at `tick`.
pub fn tick_to_price(tick: i32, decimals0: u8, decimals1: u8) -> f64 {
    let raw = 1.0001f64.powi(tick);
    raw * 10f64.powi(i32::from(decimals0) - i32::from(decimals1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Q96;
    use alloy_primitives::uint;

    #[test]
    fn test_ratio_at_zero_is_q96() {
        assert_eq!(get_sqrt_ratio_at_tick(0).unwrap(), Q96);
    }

    #[test]
    fn test_ratio_at_bounds() {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK).unwrap(), MIN_SQRT_RATIO);
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK).unwrap(), MAX_SQRT_RATIO);
    }

    #[test]
    fn test_ratio_near_zero() {
        assert_eq!(
            get_sqrt_ratio_at_tick(1).unwrap(),
            uint!(79232123823359799118286999568_U256)
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(-1).unwrap(),
            uint!(79224201403219477170569942574_U256)
        );
    }

    #[test]
    fn test_ratio_rejects_out_of_range() {
        assert_eq!(
            get_sqrt_ratio_at_tick(MAX_TICK + 1),
            Err(MathError::TickOutOfRange { tick: MAX_TICK + 1 })
        );
        assert!(get_sqrt_ratio_at_tick(MIN_TICK - 1).is_err());
    }

    #[test]
    fn test_tick_at_ratio_inverts() {
        for tick in [MIN_TICK, -46055, -120, -1, 0, 1, 60, 46054, MAX_TICK - 1] {
            let ratio = get_sqrt_ratio_at_tick(tick).unwrap();
            assert_eq!(get_tick_at_sqrt_ratio(ratio).unwrap(), tick);
        }
        // one below a grid point belongs to the tick underneath
        let ratio = get_sqrt_ratio_at_tick(50).unwrap() - U256::from(1u8);
        assert_eq!(get_tick_at_sqrt_ratio(ratio).unwrap(), 49);
    }

    #[test]
    fn test_tick_at_ratio_bounds() {
        assert!(get_tick_at_sqrt_ratio(MIN_SQRT_RATIO - U256::from(1u8)).is_err());
        assert!(get_tick_at_sqrt_ratio(MAX_SQRT_RATIO).is_err());
        assert_eq!(get_tick_at_sqrt_ratio(MIN_SQRT_RATIO).unwrap(), MIN_TICK);
    }

    #[test]
    fn test_nearest_usable_tick_rounding() {
        assert_eq!(nearest_usable_tick(5, 10).unwrap(), 10);
        assert_eq!(nearest_usable_tick(4, 10).unwrap(), 0);
        assert_eq!(nearest_usable_tick(-5, 10).unwrap(), 0);
        assert_eq!(nearest_usable_tick(-6, 10).unwrap(), -10);
        assert_eq!(nearest_usable_tick(-15, 10).unwrap(), -10);
        assert_eq!(nearest_usable_tick(34, 60).unwrap(), 60);
        assert_eq!(nearest_usable_tick(-46055, 60).unwrap(), -46080);
    }

    #[test]
    fn test_nearest_usable_tick_clamps() {
        assert_eq!(nearest_usable_tick(MAX_TICK, 60).unwrap(), 887220);
        assert_eq!(nearest_usable_tick(MIN_TICK, 60).unwrap(), -887220);
        assert_eq!(nearest_usable_tick(MAX_TICK, 1).unwrap(), MAX_TICK);
    }

    #[test]
    fn test_nearest_usable_tick_errors() {
        assert_eq!(
            nearest_usable_tick(0, 0),
            Err(MathError::InvalidTickSpacing { spacing: 0 })
        );
        assert!(nearest_usable_tick(MAX_TICK + 1, 10).is_err());
    }

    #[test]
    fn test_position_range() {
        assert_eq!(position_range(-46055, 60, 2).unwrap(), (-46200, -45960));
        assert!(position_range(MAX_TICK, 60, 2).is_err());
        assert!(position_range(0, 60, 0).is_err());
    }

    #[test]
    fn test_tick_to_price() {
        assert!((tick_to_price(0, 18, 18) - 1.0).abs() < 1e-12);
        // ~0.01 token1 per token0
        assert!((tick_to_price(-46055, 18, 18) - 0.01).abs() < 1e-5);
        // decimal shift of 12 orders
        assert!((tick_to_price(0, 18, 6) - 1e12).abs() < 1.0);
    }
}
