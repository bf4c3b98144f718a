//! Checked integer helpers shared by every share and fee formula.
//!
//! Intermediates are widened to u128 and every step traps on overflow,
//! underflow or a zero divisor instead of wrapping.

use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::error::VaultError;

/// amount * numerator / denominator, truncating toward zero
pub fn mul_div(amount: u64, numerator: u64, denominator: u64) -> Result<u64> {
    let quotient = (amount as u128)
        .checked_mul(numerator as u128)
        .ok_or(error!(VaultError::MathOverflow))?
        .checked_div(denominator as u128)
        .ok_or(error!(VaultError::DivisionByZero))?;

    u64::try_from(quotient).map_err(|_| error!(VaultError::MathOverflow))
}

/// Apply a basis-point fraction to an amount
pub fn apply_bps(amount: u64, bps: u16) -> Result<u64> {
    mul_div(amount, bps as u64, BPS_DENOMINATOR as u64)
}

pub fn checked_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(error!(VaultError::MathOverflow))
}

pub fn checked_sub(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or(error!(VaultError::MathUnderflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_bps_truncates() {
        assert_eq!(apply_bps(100, 200).unwrap(), 2);
        assert_eq!(apply_bps(100, 100).unwrap(), 1);
        // 149 * 1% = 1.49
        assert_eq!(apply_bps(149, 100).unwrap(), 1);
        assert_eq!(apply_bps(99, 100).unwrap(), 0);
        assert_eq!(apply_bps(0, 200).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_uses_wide_intermediate() {
        // u64::MAX * 2 overflows u64 but the quotient fits
        assert_eq!(mul_div(u64::MAX, 2, 4).unwrap(), u64::MAX / 2);
    }

    #[test]
    fn test_mul_div_rejects_unrepresentable_results() {
        assert_eq!(
            mul_div(u64::MAX, 2, 1).unwrap_err(),
            error!(VaultError::MathOverflow)
        );
        assert_eq!(
            mul_div(1, 1, 0).unwrap_err(),
            error!(VaultError::DivisionByZero)
        );
    }

    #[test]
    fn test_checked_sub_traps() {
        assert_eq!(
            checked_sub(1, 2).unwrap_err(),
            error!(VaultError::MathUnderflow)
        );
    }
}
