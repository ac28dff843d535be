//! Transaction records and the append-only per-account log.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tallybank_common::{format_amount, format_timestamp, now, Timestamp, TransactionId};

/// Kind of balance-affecting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Opening balance recorded at account creation.
    InitialDeposit,
    /// Funds added by the customer.
    Deposit,
    /// Funds taken out by the customer.
    Withdrawal,
    /// Charge levied by the bank.
    Fee,
    /// Interest credited to the account.
    Interest,
}

impl TransactionKind {
    /// Label used in rendered log lines.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::InitialDeposit => "INITIAL_DEPOSIT",
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
            TransactionKind::Fee => "FEE",
            TransactionKind::Interest => "INTEREST",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single entry in an account's transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique record ID.
    pub id: TransactionId,
    /// When the event was logged.
    pub timestamp: Timestamp,
    /// What happened.
    pub kind: TransactionKind,
    /// Amount moved by this event.
    pub amount: Decimal,
    /// Account balance immediately after the event.
    pub resulting_balance: Decimal,
}

impl TransactionRecord {
    /// Create a record stamped with the current time.
    pub fn new(kind: TransactionKind, amount: Decimal, resulting_balance: Decimal) -> Self {
        Self {
            id: TransactionId::new(),
            timestamp: now(),
            kind,
            amount,
            resulting_balance,
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | Balance: {}",
            format_timestamp(&self.timestamp),
            self.kind,
            format_amount(self.amount),
            format_amount(self.resulting_balance)
        )
    }
}

/// Append-only, chronologically ordered log of transaction records.
///
/// Records can only be pushed; nothing is ever reordered or removed.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
}

impl TransactionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return a reference to it.
    pub(crate) fn append(&mut self, record: TransactionRecord) -> &TransactionRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Number of records logged so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransactionRecord> {
        self.records.last()
    }

    /// Iterate records in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter()
    }

    /// Owned copy of every record; changes to it never reach the log.
    pub fn snapshot(&self) -> Vec<TransactionRecord> {
        self.records.clone()
    }
}
