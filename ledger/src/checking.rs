//! Checking accounts: fee-bearing withdrawals with overdraft protection.

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use tallybank_common::{format_amount, AccountNumber, LedgerError, Result};

use crate::account::{Account, AccountCore, AccountType, SummaryField};
use crate::config::CheckingPolicy;
use crate::journal::TransactionKind;

/// Transactional account that may run a negative balance down to its
/// overdraft limit. Every withdrawal also pays the policy fee.
#[derive(Debug, Clone)]
pub struct CheckingAccount {
    core: AccountCore,
    overdraft_limit: Decimal,
    policy: CheckingPolicy,
}

impl CheckingAccount {
    /// Open a checking account under the default policy.
    pub fn new(
        account_number: AccountNumber,
        customer_name: impl Into<String>,
        initial_balance: Decimal,
        overdraft_limit: Decimal,
    ) -> Result<Self> {
        Self::with_policy(
            account_number,
            customer_name,
            initial_balance,
            overdraft_limit,
            CheckingPolicy::default(),
        )
    }

    /// Open a checking account under an explicit policy.
    pub fn with_policy(
        account_number: AccountNumber,
        customer_name: impl Into<String>,
        initial_balance: Decimal,
        overdraft_limit: Decimal,
        policy: CheckingPolicy,
    ) -> Result<Self> {
        check_limit(overdraft_limit)?;
        let core = AccountCore::open(account_number, customer_name, initial_balance)?;

        Ok(Self {
            core,
            overdraft_limit,
            policy,
        })
    }

    pub fn overdraft_limit(&self) -> Decimal {
        self.overdraft_limit
    }

    pub fn transaction_fee(&self) -> Decimal {
        self.policy.transaction_fee
    }

    /// Balance plus the unused overdraft allowance, saturating at `Decimal::MAX`.
    pub fn available_funds(&self) -> Decimal {
        self.core.balance().saturating_add(self.overdraft_limit)
    }

    pub fn is_overdrawn(&self) -> bool {
        self.core.balance() < Decimal::ZERO
    }

    /// Replace the overdraft limit.
    ///
    /// The new limit must be non-negative and must still cover the current
    /// balance if the account is overdrawn. Balance and log are untouched.
    #[instrument(skip(self), fields(account = %self.core.account_number()))]
    pub fn set_overdraft_limit(&mut self, new_limit: Decimal) -> Result<()> {
        check_limit(new_limit)?;

        let balance = self.core.balance();
        if self.is_overdrawn() && new_limit < -balance {
            warn!(
                limit = %new_limit,
                balance = %balance,
                "Overdraft limit would not cover current balance"
            );
            return Err(LedgerError::OverdraftLimitBelowDebt {
                limit: new_limit,
                balance,
            });
        }

        let previous = std::mem::replace(&mut self.overdraft_limit, new_limit);
        info!(previous = %previous, limit = %new_limit, "Overdraft limit updated");
        Ok(())
    }
}

fn check_limit(limit: Decimal) -> Result<()> {
    if limit < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount {
            operation: "overdraft limit",
            amount: limit,
        });
    }
    Ok(())
}

impl Account for CheckingAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn account_type(&self) -> AccountType {
        AccountType::Checking
    }

    fn deposit(&mut self, amount: Decimal) -> Result<Decimal> {
        self.core.deposit(amount)
    }

    #[instrument(skip(self), fields(account = %self.core.account_number()))]
    fn withdraw(&mut self, amount: Decimal) -> Result<Decimal> {
        self.core.ensure_positive("withdrawal", amount)?;

        let fee = self.policy.transaction_fee;
        let total = amount
            .checked_add(fee)
            .ok_or(LedgerError::AmountOverflow {
                operation: "withdrawal",
                amount,
            })?;
        let available = self.available_funds();
        if total > available {
            warn!(
                amount = %amount,
                fee = %fee,
                available = %available,
                "Withdrawal exceeds balance and overdraft limit"
            );
            return Err(LedgerError::OverdraftExceeded {
                requested: amount,
                fee,
                available,
            });
        }

        let balance = self.core.apply(
            "withdrawal",
            -total,
            &[
                (TransactionKind::Withdrawal, amount),
                (TransactionKind::Fee, fee),
            ],
        )?;

        if balance < Decimal::ZERO {
            info!(
                amount = %amount,
                fee = %fee,
                balance = %balance,
                "Withdrawal applied, account overdrawn"
            );
        } else {
            info!(amount = %amount, fee = %fee, balance = %balance, "Withdrawal applied");
        }
        Ok(balance)
    }

    fn details(&self) -> Vec<SummaryField> {
        vec![
            SummaryField::new("Overdraft Limit", format_amount(self.overdraft_limit)),
            SummaryField::new("Transaction Fee", format_amount(self.policy.transaction_fee)),
        ]
    }
}
