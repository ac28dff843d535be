//! Savings accounts: minimum-balance withdrawals and interest.

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use tallybank_common::{format_amount, AccountNumber, InterestRate, LedgerError, Result};

use crate::account::{Account, AccountCore, AccountType, SummaryField};
use crate::config::SavingsPolicy;
use crate::journal::TransactionKind;

/// Interest-bearing account that keeps a minimum balance.
#[derive(Debug, Clone)]
pub struct SavingsAccount {
    core: AccountCore,
    interest_rate: InterestRate,
    policy: SavingsPolicy,
}

impl SavingsAccount {
    /// Open a savings account under the default policy.
    pub fn new(
        account_number: AccountNumber,
        customer_name: impl Into<String>,
        initial_balance: Decimal,
        interest_rate: Decimal,
    ) -> Result<Self> {
        Self::with_policy(
            account_number,
            customer_name,
            initial_balance,
            interest_rate,
            SavingsPolicy::default(),
        )
    }

    /// Open a savings account under an explicit policy.
    pub fn with_policy(
        account_number: AccountNumber,
        customer_name: impl Into<String>,
        initial_balance: Decimal,
        interest_rate: Decimal,
        policy: SavingsPolicy,
    ) -> Result<Self> {
        let interest_rate = InterestRate::new(interest_rate)?;
        let core = AccountCore::open(account_number, customer_name, initial_balance)?;

        Ok(Self {
            core,
            interest_rate,
            policy,
        })
    }

    pub fn interest_rate(&self) -> InterestRate {
        self.interest_rate
    }

    pub fn minimum_balance(&self) -> Decimal {
        self.policy.minimum_balance
    }

    /// Interest the current balance would earn, without applying it.
    ///
    /// Fails with `AmountOverflow` only when the product is not representable.
    pub fn calculate_interest(&self) -> Result<Decimal> {
        self.interest_rate.interest_on(self.core.balance())
    }

    /// Credit one period of interest on the current balance.
    ///
    /// Returns the interest amount. A balance too large to credit is left
    /// untouched and reported as `AmountOverflow`.
    #[instrument(skip(self), fields(account = %self.core.account_number()))]
    pub fn apply_interest(&mut self) -> Result<Decimal> {
        let interest = self.calculate_interest()?;
        let balance =
            self.core
                .apply("interest", interest, &[(TransactionKind::Interest, interest)])?;

        info!(
            interest = %interest,
            rate = %self.interest_rate,
            balance = %balance,
            "Interest applied"
        );
        Ok(interest)
    }
}

impl Account for SavingsAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn account_type(&self) -> AccountType {
        AccountType::Savings
    }

    fn deposit(&mut self, amount: Decimal) -> Result<Decimal> {
        self.core.deposit(amount)
    }

    #[instrument(skip(self), fields(account = %self.core.account_number()))]
    fn withdraw(&mut self, amount: Decimal) -> Result<Decimal> {
        self.core.ensure_positive("withdrawal", amount)?;

        let balance = self.core.balance();
        let minimum = self.policy.minimum_balance;
        let remaining = balance
            .checked_sub(amount)
            .ok_or(LedgerError::AmountOverflow {
                operation: "withdrawal",
                amount,
            })?;
        if remaining < minimum {
            warn!(
                amount = %amount,
                balance = %balance,
                minimum = %minimum,
                "Withdrawal would breach minimum balance"
            );
            return Err(LedgerError::BelowMinimumBalance {
                requested: amount,
                balance,
                minimum,
            });
        }

        let balance =
            self.core
                .apply("withdrawal", -amount, &[(TransactionKind::Withdrawal, amount)])?;
        info!(amount = %amount, balance = %balance, "Withdrawal applied");
        Ok(balance)
    }

    fn details(&self) -> Vec<SummaryField> {
        vec![
            SummaryField::new("Interest Rate", self.interest_rate.to_string()),
            SummaryField::new(
                "Minimum Balance Requirement",
                format_amount(self.policy.minimum_balance),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MINIMUM_BALANCE;
    use proptest::prelude::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn savings(initial: &str, rate: &str) -> SavingsAccount {
        SavingsAccount::new(
            AccountNumber::new("SA001").unwrap(),
            "John Doe",
            dec(initial),
            dec(rate),
        )
        .unwrap()
    }

    #[test]
    fn test_demo_sequence() {
        let mut account = savings("1000.00", "2.5");

        assert_eq!(account.deposit(dec("500")).unwrap(), dec("1500.00"));

        // 1500 - 1300 leaves exactly 200, which clears the 100 floor
        assert_eq!(account.withdraw(dec("1300")).unwrap(), dec("200.00"));

        let err = account.withdraw(dec("200")).unwrap_err();
        assert!(matches!(err, LedgerError::BelowMinimumBalance { .. }));
        assert_eq!(account.balance(), dec("200.00"));

        assert_eq!(account.apply_interest().unwrap(), dec("5.00"));
        assert_eq!(account.balance(), dec("205.00"));

        let kinds: Vec<_> = account
            .transaction_history()
            .iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::InitialDeposit,
                TransactionKind::Deposit,
                TransactionKind::Withdrawal,
                TransactionKind::Interest,
            ]
        );
    }

    #[test]
    fn test_withdraw_down_to_minimum_exactly() {
        let mut account = savings("300", "1");
        assert_eq!(account.withdraw(dec("200")).unwrap(), dec("100"));
        assert!(account.withdraw(dec("0.01")).is_err());
    }

    #[test]
    fn test_withdraw_rejects_non_positive() {
        let mut account = savings("500", "1");

        for amount in [dec("0"), dec("-20")] {
            let err = account.withdraw(amount).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_AMOUNT");
        }
        assert_eq!(account.balance(), dec("500"));
        assert_eq!(account.transaction_history().len(), 1);
    }

    #[test]
    fn test_rejected_withdrawal_is_idempotent() {
        let mut account = savings("150", "1");

        let first = account.withdraw(dec("100")).unwrap_err();
        let second = account.withdraw(dec("100")).unwrap_err();

        assert_eq!(first, second);
        assert_eq!(account.balance(), dec("150"));
        assert_eq!(account.transaction_history().len(), 1);
    }

    #[test]
    fn test_calculate_interest_is_pure() {
        let account = savings("1000", "2.5");
        assert_eq!(account.calculate_interest().unwrap(), dec("25"));
        assert_eq!(account.calculate_interest().unwrap(), dec("25"));
        assert_eq!(account.balance(), dec("1000"));
        assert_eq!(account.transaction_history().len(), 1);
    }

    #[test]
    fn test_interest_compounds() {
        let mut account = savings("1000", "10");
        account.apply_interest().unwrap();
        account.apply_interest().unwrap();

        assert_eq!(account.balance(), dec("1210"));
        let history = account.transaction_history();
        assert_eq!(history[1].amount, dec("100"));
        assert_eq!(history[2].amount, dec("110"));
        assert_eq!(history[2].resulting_balance, dec("1210"));
    }

    #[test]
    fn test_custom_policy() {
        let mut account = SavingsAccount::with_policy(
            AccountNumber::new("SA002").unwrap(),
            "Ann Lee",
            dec("100"),
            dec("0"),
            SavingsPolicy {
                minimum_balance: Decimal::ZERO,
            },
        )
        .unwrap();

        assert_eq!(account.withdraw(dec("100")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = SavingsAccount::new(
            AccountNumber::new("SA003").unwrap(),
            "Ann Lee",
            dec("100"),
            dec("-0.5"),
        );
        assert!(matches!(result, Err(LedgerError::InvalidRate(_))));
    }

    #[test]
    fn test_interest_on_huge_balance_is_rejected() {
        let mut account = SavingsAccount::new(
            AccountNumber::new("SA004").unwrap(),
            "Ann Lee",
            Decimal::MAX,
            dec("10"),
        )
        .unwrap();

        let err = account.apply_interest().unwrap_err();
        assert_eq!(err.error_code(), "AMOUNT_OVERFLOW");
        assert_eq!(account.balance(), Decimal::MAX);
        assert_eq!(account.transaction_history().len(), 1);

        // Product itself out of range
        let mut doubling = SavingsAccount::new(
            AccountNumber::new("SA005").unwrap(),
            "Ann Lee",
            Decimal::MAX,
            dec("200"),
        )
        .unwrap();
        assert!(doubling.calculate_interest().is_err());
        assert!(doubling.apply_interest().is_err());
        assert_eq!(doubling.transaction_history().len(), 1);
    }

    #[test]
    fn test_huge_amounts_never_panic() {
        let mut account = savings("1000", "2.5");

        assert_eq!(
            account.deposit(Decimal::MAX).unwrap_err().error_code(),
            "AMOUNT_OVERFLOW"
        );
        assert_eq!(
            account.withdraw(Decimal::MAX).unwrap_err().error_code(),
            "BELOW_MINIMUM_BALANCE"
        );
        assert_eq!(account.balance(), dec("1000"));
        assert_eq!(account.transaction_history().len(), 1);
    }

    #[test]
    fn test_display_info() {
        let account = savings("1000", "2.5");
        let info = account.display_info();

        assert!(info.contains("Account Number: SA001"));
        assert!(info.contains("Balance: $1000.00"));
        assert!(info.contains("Account Type: Savings Account"));
        assert!(info.contains("Interest Rate: 2.5%"));
        assert!(info.contains("Minimum Balance Requirement: $100.00"));
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    /// Positive decimals across the whole mantissa range, up to `Decimal::MAX`.
    fn any_positive() -> impl Strategy<Value = Decimal> {
        (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale))
            .prop_filter("strictly positive", |d| *d > Decimal::ZERO)
    }

    proptest! {
        #[test]
        fn withdraw_succeeds_iff_minimum_holds(initial in cents(), amount in cents()) {
            let mut account = SavingsAccount::new(
                AccountNumber::new("SAP").unwrap(),
                "Prop",
                initial,
                Decimal::ONE,
            )
            .unwrap();
            let before = account.transaction_history().len();

            let result = account.withdraw(amount);

            if initial - amount >= DEFAULT_MINIMUM_BALANCE {
                prop_assert_eq!(result.unwrap(), initial - amount);
                prop_assert_eq!(account.balance(), initial - amount);
                let history = account.transaction_history();
                prop_assert_eq!(history.len(), before + 1);
                prop_assert_eq!(history[before].kind, TransactionKind::Withdrawal);
                prop_assert_eq!(history[before].resulting_balance, initial - amount);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(account.balance(), initial);
                prop_assert_eq!(account.transaction_history().len(), before);
            }
        }

        #[test]
        fn interest_adds_rate_share_of_balance(
            initial in cents(),
            rate in (0i64..2_000).prop_map(|r| Decimal::new(r, 2)),
        ) {
            let mut account = SavingsAccount::new(
                AccountNumber::new("SAP").unwrap(),
                "Prop",
                initial,
                rate,
            )
            .unwrap();

            let interest = account.apply_interest().unwrap();

            prop_assert_eq!(interest, initial * rate / Decimal::ONE_HUNDRED);
            prop_assert_eq!(account.balance(), initial + interest);
            let history = account.transaction_history();
            prop_assert_eq!(history.len(), 2);
            prop_assert_eq!(history[1].kind, TransactionKind::Interest);
        }

        #[test]
        fn any_positive_amount_is_handled_without_panic(
            initial in cents(),
            amount in any_positive(),
        ) {
            let mut account = SavingsAccount::new(
                AccountNumber::new("SAP").unwrap(),
                "Prop",
                initial,
                Decimal::ONE,
            )
            .unwrap();

            match account.deposit(amount) {
                Ok(balance) => {
                    prop_assert_eq!(balance, initial + amount);
                }
                Err(err) => {
                    prop_assert_eq!(err.error_code(), "AMOUNT_OVERFLOW");
                    prop_assert_eq!(account.balance(), initial);
                }
            }

            let before = account.balance();
            let len = account.transaction_history().len();
            if account.withdraw(amount).is_err() {
                prop_assert_eq!(account.balance(), before);
                prop_assert_eq!(account.transaction_history().len(), len);
            }
        }

        #[test]
        fn non_positive_amounts_change_nothing(raw in -10_000_000i64..=0) {
            let amount = Decimal::new(raw, 2);
            let mut account = savings("1000", "2.5");

            prop_assert!(account.deposit(amount).is_err());
            prop_assert!(account.withdraw(amount).is_err());
            prop_assert_eq!(account.balance(), dec("1000"));
            prop_assert_eq!(account.transaction_history().len(), 1);
        }
    }
}
