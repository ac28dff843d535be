//! Monetary helpers for TallyBank.
//!
//! Balances and amounts are plain [`Decimal`] values; there is no currency
//! dimension. Rounding only happens at display time.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, Result};

/// Decimal places used when rendering amounts.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Check if an amount is strictly positive.
pub fn is_positive(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}

/// Round an amount to display precision (half away from zero).
pub fn round_display(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    );
    rounded.rescale(DISPLAY_DECIMAL_PLACES);
    rounded
}

/// Format an amount as two-decimal dollar text, e.g. `$1500.00` or `-$201.50`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_display(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", rounded.abs())
    } else {
        format!("${}", rounded.abs())
    }
}

/// Parse an amount from text such as `"1000.00"`.
pub fn parse_amount(value: &str) -> std::result::Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(value.trim())
}

/// Interest rate expressed as a percentage (2.5 means 2.5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterestRate(Decimal);

impl InterestRate {
    /// Create a new interest rate. Negative rates are rejected.
    pub fn new(percent: Decimal) -> Result<Self> {
        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(LedgerError::InvalidRate(percent));
        }
        Ok(Self(percent))
    }

    /// Get the rate as a fraction (2.5% -> 0.025).
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Interest earned on `balance` for one application of this rate.
    pub fn interest_on(&self, balance: Decimal) -> Result<Decimal> {
        balance
            .checked_mul(self.as_fraction())
            .ok_or(LedgerError::AmountOverflow {
                operation: "interest",
                amount: balance,
            })
    }
}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from(1500)), "$1500.00");
        assert_eq!(format_amount(Decimal::new(-20150, 2)), "-$201.50");
        assert_eq!(format_amount(Decimal::new(15, 1)), "$1.50");
        assert_eq!(format_amount(Decimal::new(12345, 3)), "$12.35");
        assert_eq!(format_amount(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000.00").unwrap(), Decimal::from(1000));
        assert_eq!(parse_amount(" 2.5 ").unwrap(), Decimal::new(25, 1));
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_interest_rate() {
        let rate = InterestRate::new(Decimal::new(25, 1)).unwrap();
        assert_eq!(rate.as_fraction(), Decimal::new(25, 3));
        assert_eq!(rate.interest_on(Decimal::from(200)).unwrap(), Decimal::from(5));
        assert_eq!(rate.to_string(), "2.5%");
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = InterestRate::new(Decimal::from(-1)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RATE");
        assert!(InterestRate::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_interest_on_huge_balance() {
        let doubling = InterestRate::new(Decimal::from(200)).unwrap();
        let err = doubling.interest_on(Decimal::MAX).unwrap_err();
        assert_eq!(err.error_code(), "AMOUNT_OVERFLOW");

        let small = InterestRate::new(Decimal::ONE).unwrap();
        assert!(small.interest_on(Decimal::MAX).is_ok());
    }
}
