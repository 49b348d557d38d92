//! 512-bit intermediate multiplication and division.

use super::MathError;
use alloy_primitives::{U256, U512};

/// `floor(a * b / denominator)` without intermediate overflow
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product = U512::from(a) * U512::from(b);
    narrow(product / U512::from(denominator))
}

/// `ceil(a * b / denominator)` without intermediate overflow
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product = U512::from(a) * U512::from(b);
    let denominator = U512::from(denominator);
    let mut quotient = product / denominator;
    if !(product % denominator).is_zero() {
        quotient += U512::from(1u8);
    }
    narrow(quotient)
}

pub(crate) fn div_rounding_up(a: U256, b: U256) -> Result<U256, MathError> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let quotient = a / b;
    if (a % b).is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::from(1u8))
    }
}

pub(crate) fn narrow(value: U512) -> Result<U256, MathError> {
    U256::checked_from_uint(value).ok_or(MathError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_exact() {
        let r = mul_div(U256::from(6u8), U256::from(7u8), U256::from(3u8)).unwrap();
        assert_eq!(r, U256::from(14u8));
    }

    #[test]
    fn test_mul_div_rounds() {
        let a = U256::from(10u8);
        let b = U256::from(10u8);
        let d = U256::from(3u8);
        assert_eq!(mul_div(a, b, d).unwrap(), U256::from(33u8));
        assert_eq!(mul_div_rounding_up(a, b, d).unwrap(), U256::from(34u8));
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        // (2^255 * 4) / 8 overflows 256 bits only in the product
        let a = U256::from(1u8) << 255;
        let r = mul_div(a, U256::from(4u8), U256::from(8u8)).unwrap();
        assert_eq!(r, U256::from(1u8) << 254);
    }

    #[test]
    fn test_mul_div_overflow_and_zero() {
        assert_eq!(
            mul_div(U256::MAX, U256::from(2u8), U256::from(1u8)),
            Err(MathError::Overflow)
        );
        assert_eq!(
            mul_div_rounding_up(U256::from(1u8), U256::from(1u8), U256::ZERO),
            Err(MathError::DivisionByZero)
        );
    }

    #[test]
    fn test_div_rounding_up() {
        assert_eq!(
            div_rounding_up(U256::from(7u8), U256::from(2u8)).unwrap(),
            U256::from(4u8)
        );
        assert_eq!(
            div_rounding_up(U256::from(8u8), U256::from(2u8)).unwrap(),
            U256::from(4u8)
        );
    }
}
