//! The account contract shared by every account kind.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use tallybank_common::{
    format_amount, is_positive, now, AccountNumber, LedgerError, Result, Timestamp,
};

use crate::journal::{TransactionKind, TransactionLog, TransactionRecord};

/// Account kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Interest-bearing account with a minimum balance.
    Savings,
    /// Transactional account with overdraft and per-withdrawal fee.
    Checking,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Savings => f.write_str("Savings Account"),
            AccountType::Checking => f.write_str("Checking Account"),
        }
    }
}

/// Identity, balance and transaction log common to all accounts.
///
/// The balance can only move through [`AccountCore::apply`], which logs
/// every change in the same call. Code outside this crate only ever sees
/// `&AccountCore`.
#[derive(Debug, Clone)]
pub struct AccountCore {
    account_number: AccountNumber,
    customer_name: String,
    balance: Decimal,
    history: TransactionLog,
    opened_at: Timestamp,
}

impl AccountCore {
    /// Open an account and log its opening balance.
    pub(crate) fn open(
        account_number: AccountNumber,
        customer_name: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<Self> {
        if initial_balance.is_sign_negative() && !initial_balance.is_zero() {
            return Err(LedgerError::InvalidAmount {
                operation: "initial deposit",
                amount: initial_balance,
            });
        }

        let mut core = Self {
            account_number,
            customer_name: customer_name.into(),
            balance: initial_balance,
            history: TransactionLog::new(),
            opened_at: now(),
        };
        core.log(TransactionKind::InitialDeposit, initial_balance);

        info!(
            account = %core.account_number,
            initial_balance = %initial_balance,
            "Account opened"
        );

        Ok(core)
    }

    /// Account number.
    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    /// Account holder name.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Current balance.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Transaction log, oldest first.
    pub fn history(&self) -> &TransactionLog {
        &self.history
    }

    /// When the account was opened.
    pub fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    /// Reject zero and negative amounts for `operation`.
    pub(crate) fn ensure_positive(&self, operation: &'static str, amount: Decimal) -> Result<()> {
        if is_positive(amount) {
            return Ok(());
        }
        warn!(
            account = %self.account_number,
            operation,
            amount = %amount,
            "Rejected non-positive amount"
        );
        Err(LedgerError::InvalidAmount { operation, amount })
    }

    /// Move the balance by `delta`, then log each entry in order.
    ///
    /// All entries carry the balance after the whole delta is applied. If the
    /// new balance is not representable nothing changes and nothing is logged.
    pub(crate) fn apply(
        &mut self,
        operation: &'static str,
        delta: Decimal,
        entries: &[(TransactionKind, Decimal)],
    ) -> Result<Decimal> {
        let Some(balance) = self.balance.checked_add(delta) else {
            warn!(
                account = %self.account_number,
                operation,
                delta = %delta,
                "Rejected amount outside balance range"
            );
            return Err(LedgerError::AmountOverflow {
                operation,
                amount: delta.abs(),
            });
        };

        self.balance = balance;
        for &(kind, amount) in entries {
            self.log(kind, amount);
        }
        Ok(balance)
    }

    /// Add a deposit.
    #[instrument(skip(self), fields(account = %self.account_number))]
    pub(crate) fn deposit(&mut self, amount: Decimal) -> Result<Decimal> {
        self.ensure_positive("deposit", amount)?;

        let balance = self.apply("deposit", amount, &[(TransactionKind::Deposit, amount)])?;
        info!(amount = %amount, balance = %balance, "Deposit applied");
        Ok(balance)
    }

    fn log(&mut self, kind: TransactionKind, amount: Decimal) {
        let record = self
            .history
            .append(TransactionRecord::new(kind, amount, self.balance));
        debug!(
            account = %self.account_number,
            kind = %record.kind,
            amount = %record.amount,
            resulting_balance = %record.resulting_balance,
            "Transaction logged"
        );
    }
}

/// Operations every account kind supports.
pub trait Account {
    /// Shared identity, balance and log.
    fn core(&self) -> &AccountCore;

    /// Which kind of account this is.
    fn account_type(&self) -> AccountType;

    /// Deposit a strictly positive amount and return the new balance.
    fn deposit(&mut self, amount: Decimal) -> Result<Decimal>;

    /// Withdraw under this account kind's policy and return the new balance.
    fn withdraw(&mut self, amount: Decimal) -> Result<Decimal>;

    /// Type-specific lines for [`Account::summary`].
    fn details(&self) -> Vec<SummaryField>;

    fn account_number(&self) -> &AccountNumber {
        self.core().account_number()
    }

    fn customer_name(&self) -> &str {
        self.core().customer_name()
    }

    fn balance(&self) -> Decimal {
        self.core().balance()
    }

    /// Copy of the transaction log.
    fn transaction_history(&self) -> Vec<TransactionRecord> {
        self.core().history().snapshot()
    }

    fn summary(&self) -> AccountSummary {
        AccountSummary {
            account_number: self.account_number().clone(),
            customer_name: self.customer_name().to_string(),
            account_type: self.account_type(),
            balance: self.balance(),
            opened_at: self.core().opened_at(),
            details: self.details(),
        }
    }

    /// Human-readable account summary.
    fn display_info(&self) -> String {
        self.summary().to_string()
    }
}

/// A labelled line in an account summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryField {
    pub label: String,
    pub value: String,
}

impl SummaryField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Point-in-time view of an account for display or export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_number: AccountNumber,
    pub customer_name: String,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub opened_at: Timestamp,
    pub details: Vec<SummaryField>,
}

impl fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Account Information =====")?;
        writeln!(f, "Account Number: {}", self.account_number)?;
        writeln!(f, "Customer Name: {}", self.customer_name)?;
        writeln!(f, "Balance: {}", format_amount(self.balance))?;
        write!(f, "Account Type: {}", self.account_type)?;
        for field in &self.details {
            write!(f, "\n{}: {}", field.label, field.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(initial: i64) -> AccountCore {
        AccountCore::open(
            AccountNumber::new("T001").unwrap(),
            "Test Holder",
            Decimal::from(initial),
        )
        .unwrap()
    }

    #[test]
    fn test_open_logs_initial_deposit() {
        let core = open(250);

        assert_eq!(core.balance(), Decimal::from(250));
        assert_eq!(core.history().len(), 1);
        let record = core.history().last().unwrap();
        assert_eq!(record.kind, TransactionKind::InitialDeposit);
        assert_eq!(record.resulting_balance, Decimal::from(250));
    }

    #[test]
    fn test_open_with_zero_balance() {
        let core = open(0);
        assert_eq!(core.balance(), Decimal::ZERO);
        assert_eq!(core.history().len(), 1);
    }

    #[test]
    fn test_open_rejects_negative_balance() {
        let err = AccountCore::open(
            AccountNumber::new("T002").unwrap(),
            "Test Holder",
            Decimal::from(-1),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_AMOUNT");
    }

    #[test]
    fn test_apply_logs_every_entry_with_final_balance() {
        let mut core = open(100);
        let balance = core
            .apply(
                "withdrawal",
                Decimal::from(-30),
                &[
                    (TransactionKind::Withdrawal, Decimal::from(25)),
                    (TransactionKind::Fee, Decimal::from(5)),
                ],
            )
            .unwrap();

        assert_eq!(balance, Decimal::from(70));
        let tail: Vec<_> = core.history().iter().skip(1).collect();
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].kind, TransactionKind::Withdrawal);
        assert_eq!(tail[1].kind, TransactionKind::Fee);
        assert!(tail.iter().all(|r| r.resulting_balance == Decimal::from(70)));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut core = open(100);

        for amount in [Decimal::ZERO, Decimal::from(-10)] {
            let err = core.deposit(amount).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount { operation: "deposit", .. }));
        }
        assert_eq!(core.balance(), Decimal::from(100));
        assert_eq!(core.history().len(), 1);
    }

    #[test]
    fn test_deposit_past_balance_range_is_rejected() {
        let mut core = open(1);

        let err = core.deposit(Decimal::MAX).unwrap_err();

        assert_eq!(
            err,
            LedgerError::AmountOverflow {
                operation: "deposit",
                amount: Decimal::MAX,
            }
        );
        assert_eq!(core.balance(), Decimal::ONE);
        assert_eq!(core.history().len(), 1);

        // Still usable afterwards
        assert_eq!(core.deposit(Decimal::ONE).unwrap(), Decimal::from(2));
    }

    #[test]
    fn test_deposit_up_to_max_is_accepted() {
        let mut core = open(0);
        assert_eq!(core.deposit(Decimal::MAX).unwrap(), Decimal::MAX);
        assert!(core.deposit(Decimal::ONE).is_err());
        assert_eq!(core.history().len(), 2);
    }

    #[test]
    fn test_summary_display() {
        let summary = AccountSummary {
            account_number: AccountNumber::new("SA001").unwrap(),
            customer_name: "John Doe".to_string(),
            account_type: AccountType::Savings,
            balance: Decimal::from(1000),
            opened_at: now(),
            details: vec![SummaryField::new("Interest Rate", "2.5%")],
        };

        assert_eq!(
            summary.to_string(),
            "===== Account Information =====\n\
             Account Number: SA001\n\
             Customer Name: John Doe\n\
             Balance: $1000.00\n\
             Account Type: Savings Account\n\
             Interest Rate: 2.5%"
        );
    }
}
