//! Account policy configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tallybank_common::parse_amount;

/// Default savings minimum balance (100.00).
pub const DEFAULT_MINIMUM_BALANCE: Decimal = Decimal::from_parts(10000, 0, 0, false, 2);

/// Default checking fee charged on every withdrawal (1.50).
pub const DEFAULT_TRANSACTION_FEE: Decimal = Decimal::from_parts(150, 0, 0, false, 2);

/// Savings withdrawal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsPolicy {
    /// Floor the balance may not drop below after a withdrawal.
    pub minimum_balance: Decimal,
}

impl Default for SavingsPolicy {
    fn default() -> Self {
        Self {
            minimum_balance: DEFAULT_MINIMUM_BALANCE,
        }
    }
}

/// Checking withdrawal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckingPolicy {
    /// Fee deducted alongside every successful withdrawal.
    pub transaction_fee: Decimal,
}

impl Default for CheckingPolicy {
    fn default() -> Self {
        Self {
            transaction_fee: DEFAULT_TRANSACTION_FEE,
        }
    }
}

/// Ledger-wide configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Policy for savings accounts.
    pub savings: SavingsPolicy,
    /// Policy for checking accounts.
    pub checking: CheckingPolicy,
}

impl LedgerConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("TALLYBANK_MIN_BALANCE") {
            if let Ok(minimum) = parse_amount(&value) {
                config.savings.minimum_balance = minimum;
            }
        }

        if let Ok(value) = std::env::var("TALLYBANK_TRANSACTION_FEE") {
            if let Ok(fee) = parse_amount(&value) {
                config.checking.transaction_fee = fee;
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.savings.minimum_balance < Decimal::ZERO {
            return Err("Minimum balance cannot be negative".to_string());
        }

        if self.checking.transaction_fee < Decimal::ZERO {
            return Err("Transaction fee cannot be negative".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.savings.minimum_balance, Decimal::from(100));
        assert_eq!(config.checking.transaction_fee, Decimal::new(15, 1));
    }

    #[test]
    fn test_invalid_config() {
        let mut config = LedgerConfig::default();
        config.checking.transaction_fee = Decimal::from(-1);
        assert!(config.validate().is_err());

        let mut config = LedgerConfig::default();
        config.savings.minimum_balance = Decimal::from(-100);
        assert!(config.validate().is_err());
    }
}
