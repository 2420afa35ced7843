//! Lossless monetary amount backed by rust_decimal.
//!
//! Amounts accumulate at full precision; rounding to two decimal places
//! happens only when a value is rendered for a response.

use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monetary amount for commission and financial calculations.
///
/// Backed by rust_decimal to avoid floating-point drift across many small
/// sales. Serializes to a JSON number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Money {
    /// Create a Money from a RustDecimal.
    pub fn new(value: RustDecimal) -> Self {
        Money(value)
    }

    /// Parse a Money from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Money)
    }

    /// Format as a canonical string (no exponent notation, full precision).
    pub fn to_canonical_string(&self) -> String {
        let normalized = self.0.normalize();
        format!("{}", normalized)
    }

    /// Format rounded to two decimal places, for display fields.
    ///
    /// Rounding happens here and nowhere else; intermediate sums keep full
    /// precision.
    pub fn to_display_string(&self) -> String {
        format!("{:.2}", self.0.round_dp(2))
    }

    /// Get the underlying RustDecimal.
    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    /// The zero amount.
    pub fn zero() -> Self {
        Money(RustDecimal::ZERO)
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Returns the value 100, the divisor for percentage rates.
    pub fn hundred() -> Self {
        Money(RustDecimal::ONE_HUNDRED)
    }

    /// Build from an integer count (days in a period, etc.).
    pub fn from_u32(value: u32) -> Self {
        Money(RustDecimal::from(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<RustDecimal> for Money {
    fn from(value: RustDecimal) -> Self {
        Money(value)
    }
}

impl From<Money> for RustDecimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Money {
    type Output = Money;

    fn mul(self, rhs: Money) -> Money {
        Money(self.0 * rhs.0)
    }
}

impl std::ops::Div for Money {
    type Output = Money;

    fn div(self, rhs: Money) -> Money {
        Money(self.0 / rhs.0)
    }
}

impl std::ops::Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_parse_roundtrip() {
        let test_cases = vec!["123.456", "0.0001", "1000000", "-123.456", "0"];

        for s in test_cases {
            let money = Money::from_str_canonical(s).expect("parse failed");
            let formatted = money.to_canonical_string();
            let reparsed = Money::from_str_canonical(&formatted).expect("reparse failed");
            assert_eq!(money, reparsed, "roundtrip failed for {}", s);
        }
    }

    #[test]
    fn test_money_canonical_no_exponent() {
        let money = Money::from_str_canonical("123").expect("parse failed");
        let formatted = money.to_canonical_string();
        assert!(!formatted.contains('e'));
        assert_eq!(formatted, "123");
    }

    #[test]
    fn test_money_display_rounds_to_cents() {
        let money = Money::from_str_canonical("10.005").unwrap();
        assert_eq!(money.to_display_string(), "10.00");

        let money = Money::from_str_canonical("10.015").unwrap();
        assert_eq!(money.to_display_string(), "10.02");
    }

    #[test]
    fn test_money_display_pads_to_cents() {
        assert_eq!(Money::from_str_canonical("500").unwrap().to_display_string(), "500.00");
        assert_eq!(Money::from_str_canonical("4.2").unwrap().to_display_string(), "4.20");
        assert_eq!(Money::zero().to_display_string(), "0.00");
    }

    #[test]
    fn test_money_accumulation_keeps_precision() {
        // Three cents of a third each; rounding per-step would drift.
        let third = Money::from_str_canonical("0.01").unwrap() / Money::from_str_canonical("3").unwrap();
        let sum = third + third + third;
        assert_eq!(sum.to_display_string(), "0.01");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_str_canonical("10.5").unwrap();
        let b = Money::from_str_canonical("2.5").unwrap();

        assert_eq!((a + b).to_canonical_string(), "13");
        assert_eq!((a - b).to_canonical_string(), "8");
        assert_eq!((a * b).to_canonical_string(), "26.25");
        assert_eq!((a / b).to_canonical_string(), "4.2");
    }

    #[test]
    fn test_money_json_is_number() {
        let money = Money::from_str_canonical("123.456").unwrap();
        let json = serde_json::to_value(money).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "123.456");
    }

    #[test]
    fn test_money_sum() {
        let amounts = vec![
            Money::from_str_canonical("1.1").unwrap(),
            Money::from_str_canonical("2.2").unwrap(),
            Money::from_str_canonical("3.3").unwrap(),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.to_canonical_string(), "6.6");
    }

    #[test]
    fn test_money_sign_checks() {
        assert!(Money::from_str_canonical("5").unwrap().is_positive());
        assert!(Money::from_str_canonical("-5").unwrap().is_negative());
        assert!(Money::zero().is_zero());
    }
}
