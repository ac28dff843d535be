//! Identifier types for TallyBank entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{LedgerError, Result};

/// Account number assigned when an account is opened.
/// Never reassigned for the lifetime of the account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Create a new account number, validating its format.
    pub fn new(number: impl Into<String>) -> Result<Self> {
        let number = Self(number.into());
        if !number.is_valid() {
            return Err(LedgerError::InvalidAccountNumber(number.0));
        }
        Ok(number)
    }

    /// Get the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the account number format.
    pub fn is_valid(&self) -> bool {
        // Non-empty, alphanumeric with dashes or underscores
        !self.0.is_empty()
            && self.0.len() <= 34
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AccountNumber> for String {
    fn from(number: AccountNumber) -> Self {
        number.0
    }
}

impl TryFrom<&str> for AccountNumber {
    type Error = LedgerError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = LedgerError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

/// Unique identifier for a transaction record.
/// Uses UUID v7 so identifiers sort in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new transaction ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
