//! Money amounts with fixed two-decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and the ledger is single-currency,
//! so no currency code travels with the amount.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places carried by every ledger amount.
pub const MONEY_SCALE: u32 = 2;

/// A monetary amount normalised to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new amount, rounding half-to-even to two decimal places.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(Self::normalize(amount))
    }

    /// Rounds an arbitrary decimal to the ledger scale using Banker's Rounding.
    #[must_use]
    pub fn normalize(amount: Decimal) -> Decimal {
        let mut rounded =
            amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(MONEY_SCALE);
        rounded
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Formats as `$10,000.00` (negative amounts as `-$25.50`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.abs().to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}${grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_normalizes_scale() {
        let money = Money::new(dec!(100));
        assert_eq!(money.amount().scale(), 2);
        assert_eq!(money.amount(), dec!(100.00));
    }

    #[test]
    fn test_money_bankers_rounding() {
        assert_eq!(Money::new(dec!(2.345)).amount(), dec!(2.34));
        assert_eq!(Money::new(dec!(2.355)).amount(), dec!(2.36));
    }

    #[test]
    fn test_money_zero_and_negative() {
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_negative());
        assert!(Money::new(dec!(-0.01)).is_negative());
        assert!(!Money::new(dec!(10)).is_negative());
    }

    #[rstest]
    #[case(dec!(0), "$0.00")]
    #[case(dec!(5.5), "$5.50")]
    #[case(dec!(500), "$500.00")]
    #[case(dec!(10000), "$10,000.00")]
    #[case(dec!(1234567.891), "$1,234,567.89")]
    #[case(dec!(-25.5), "-$25.50")]
    fn test_money_display(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(Money::new(amount).to_string(), expected);
    }
}
