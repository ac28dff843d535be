//! Error types for TallyBank ledger operations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for ledger operations.
///
/// Every variant is a local, recoverable rejection: the account that
/// produced it is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Amount was zero or negative.
    #[error("Invalid {operation} amount: {amount} (must be positive)")]
    InvalidAmount {
        operation: &'static str,
        amount: Decimal,
    },

    /// Interest rate was negative.
    #[error("Invalid interest rate: {0}%")]
    InvalidRate(Decimal),

    /// Savings withdrawal would breach the minimum balance.
    #[error("Cannot withdraw {requested}: balance {balance} must stay at or above minimum {minimum}")]
    BelowMinimumBalance {
        requested: Decimal,
        balance: Decimal,
        minimum: Decimal,
    },

    /// Checking withdrawal plus fee exceeds balance plus overdraft limit.
    #[error("Insufficient funds and overdraft limit exceeded: required {requested} + fee {fee}, available {available}")]
    OverdraftExceeded {
        requested: Decimal,
        fee: Decimal,
        available: Decimal,
    },

    /// Overdraft limit would no longer cover the current negative balance.
    #[error("Overdraft limit {limit} does not cover current balance {balance}")]
    OverdraftLimitBelowDebt { limit: Decimal, balance: Decimal },

    /// Amount would push a balance or total outside the representable range.
    #[error("{operation} amount {amount} is out of range for this account")]
    AmountOverflow {
        operation: &'static str,
        amount: Decimal,
    },

    /// Account number is empty or malformed.
    #[error("Invalid account number: {0:?}")]
    InvalidAccountNumber(String),
}

impl LedgerError {
    /// Check if this error is a withdrawal policy violation.
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            LedgerError::BelowMinimumBalance { .. } | LedgerError::OverdraftExceeded { .. }
        )
    }

    /// Get a stable error code for reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            LedgerError::InvalidAmount { .. } => "INVALID_AMOUNT",
            LedgerError::InvalidRate(_) => "INVALID_RATE",
            LedgerError::BelowMinimumBalance { .. } => "BELOW_MINIMUM_BALANCE",
            LedgerError::OverdraftExceeded { .. } => "OVERDRAFT_EXCEEDED",
            LedgerError::OverdraftLimitBelowDebt { .. } => "OVERDRAFT_LIMIT_BELOW_DEBT",
            LedgerError::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            LedgerError::InvalidAccountNumber(_) => "INVALID_ACCOUNT_NUMBER",
        }
    }
}

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
