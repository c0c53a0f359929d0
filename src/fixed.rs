//! Fixed-point arithmetic with explicit rounding.
//!
//! Wraps `rust_decimal` with the rounding policy the ledger requires.
//! Multiplication truncates to the working scale. Ratio division rounds up,
//! which biases a computed loan-to-value ratio higher and keeps the risk
//! gate strict. Conversions to and from raw integer amounts take an explicit
//! decimal-places parameter and are exact or they fail.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Fractional decimal digits every value is carried at.
pub const WORKING_SCALE: u32 = 18;

// rust_decimal cannot represent more than 28 fractional digits
const MAX_DECIMALS: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixedPoint(Decimal);

impl FixedPoint {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn one() -> Self {
        Self(Decimal::ONE)
    }

    /// Sentinel for an unbounded ratio (debt against zero collateral).
    /// Only ever compared against, never fed back into arithmetic.
    pub fn max_value() -> Self {
        Self(Decimal::MAX)
    }

    /// Truncates anything beyond the working scale.
    pub fn from_decimal(value: Decimal) -> Self {
        Self(value.trunc_with_scale(WORKING_SCALE))
    }

    /// Exact conversion from a raw integer amount in an asset's native precision.
    pub fn from_raw(raw: u128, decimals: u32) -> Result<Self, FixedPointError> {
        if decimals > MAX_DECIMALS {
            return Err(FixedPointError::UnsupportedPrecision(decimals));
        }
        if raw > i128::MAX as u128 {
            return Err(FixedPointError::Overflow);
        }
        let value = Decimal::try_from_i128_with_scale(raw as i128, decimals)
            .map_err(|_| FixedPointError::Overflow)?;
        let normalized = value.normalize();
        if normalized.scale() > WORKING_SCALE {
            return Err(FixedPointError::PrecisionLoss { decimals });
        }
        Ok(Self(normalized))
    }

    /// Exact conversion back to a raw integer amount. Fails rather than
    /// silently dropping precision finer than `decimals`.
    pub fn to_raw(&self, decimals: u32) -> Result<u128, FixedPointError> {
        if decimals > MAX_DECIMALS {
            return Err(FixedPointError::UnsupportedPrecision(decimals));
        }
        if self.0.is_sign_negative() {
            return Err(FixedPointError::Negative);
        }
        let shift = Decimal::from_i128_with_scale(10_i128.pow(decimals), 0);
        let scaled = self.0.checked_mul(shift).ok_or(FixedPointError::Overflow)?;
        if !scaled.fract().is_zero() {
            return Err(FixedPointError::PrecisionLoss { decimals });
        }
        scaled.trunc().to_u128().ok_or(FixedPointError::Overflow)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn add(&self, other: FixedPoint) -> Self {
        Self(self.0 + other.0)
    }

    /// None when the subtraction would go negative.
    pub fn checked_sub(&self, other: FixedPoint) -> Option<Self> {
        if other.0 > self.0 {
            None
        } else {
            Some(Self(self.0 - other.0))
        }
    }

    /// Clamps at zero instead of failing. Used to reverse a prior credit.
    pub fn saturating_sub(&self, other: FixedPoint) -> Self {
        self.checked_sub(other).unwrap_or_else(Self::zero)
    }

    /// Truncating multiply: digits beyond the working scale are dropped.
    pub fn mul(&self, other: FixedPoint) -> Self {
        Self((self.0 * other.0).trunc_with_scale(WORKING_SCALE))
    }

    /// Round-up divide: on the non-negative domain, any residue beyond the
    /// working scale bumps the last digit toward positive infinity.
    pub fn div_up(&self, other: FixedPoint) -> Self {
        debug_assert!(!other.is_zero());
        Self(
            (self.0 / other.0)
                .round_dp_with_strategy(WORKING_SCALE, RoundingStrategy::AwayFromZero),
        )
    }

    pub fn min(self, other: FixedPoint) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == Decimal::MAX {
            write!(f, "unbounded")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Sum for FixedPoint {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc.add(v))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FixedPointError {
    #[error("value does not fit in the fixed-point range")]
    Overflow,

    #[error("value has precision beyond {decimals} decimal places")]
    PrecisionLoss { decimals: u32 },

    #[error("unsupported precision: {0} decimal places")]
    UnsupportedPrecision(u32),

    #[error("negative value cannot convert to a raw amount")]
    Negative,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn raw_round_trip_is_exact() {
        let one_usdc = FixedPoint::from_raw(1_000_000, 6).unwrap();
        assert_eq!(one_usdc, FixedPoint::one());
        assert_eq!(one_usdc.to_raw(6).unwrap(), 1_000_000);

        let one_eth = FixedPoint::from_raw(1_000_000_000_000_000_000, 18).unwrap();
        assert_eq!(one_eth, FixedPoint::one());
    }

    #[test]
    fn fractional_raw_amounts() {
        // 0.5 USDC
        let half = FixedPoint::from_raw(500_000, 6).unwrap();
        assert_eq!(half.value(), dec!(0.5));
        assert_eq!(half.to_raw(6).unwrap(), 500_000);
    }

    #[test]
    fn to_raw_rejects_precision_loss() {
        let v = FixedPoint::from_decimal(dec!(1.5));
        assert!(matches!(
            v.to_raw(0),
            Err(FixedPointError::PrecisionLoss { decimals: 0 })
        ));
        // exact at 1 dp
        assert_eq!(v.to_raw(1).unwrap(), 15);
    }

    #[test]
    fn to_raw_rejects_negative() {
        let v = FixedPoint::from_decimal(dec!(-1));
        assert_eq!(v.to_raw(6), Err(FixedPointError::Negative));
    }

    #[test]
    fn unsupported_precision() {
        assert!(matches!(
            FixedPoint::from_raw(1, 40),
            Err(FixedPointError::UnsupportedPrecision(40))
        ));
    }

    #[test]
    fn mul_truncates_beyond_working_scale() {
        let a = FixedPoint::from_decimal(dec!(0.000000000000000001)); // 1e-18
        let b = FixedPoint::from_decimal(dec!(0.1));
        // true product 1e-19 is below the working scale, truncates to zero
        assert!(a.mul(b).is_zero());
    }

    #[test]
    fn div_up_rounds_toward_higher_ratio() {
        let one = FixedPoint::one();
        let three = FixedPoint::from_decimal(dec!(3));
        let q = one.div_up(three);
        assert_eq!(q.value(), dec!(0.333333333333333334));
    }

    #[test]
    fn div_up_exact_quotient_unchanged() {
        let forty = FixedPoint::from_decimal(dec!(40));
        let hundred = FixedPoint::from_decimal(dec!(100));
        assert_eq!(forty.div_up(hundred).value(), dec!(0.4));
    }

    #[test]
    fn checked_sub_guards_negative() {
        let a = FixedPoint::from_decimal(dec!(5));
        let b = FixedPoint::from_decimal(dec!(7));
        assert!(a.checked_sub(b).is_none());
        assert_eq!(b.checked_sub(a).unwrap().value(), dec!(2));
        assert!(a.saturating_sub(b).is_zero());
    }

    #[test]
    fn min_picks_smaller() {
        let a = FixedPoint::from_decimal(dec!(5));
        let b = FixedPoint::from_decimal(dec!(7));
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), a);
    }
}
