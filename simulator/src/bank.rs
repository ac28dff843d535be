//! Simulated branch holding the accounts a scenario opens.

use anyhow::{anyhow, bail};
use rust_decimal::Decimal;

use tallybank_common::AccountNumber;
use tallybank_ledger::{Account, CheckingAccount, LedgerConfig, SavingsAccount};

/// An account opened at the branch.
#[derive(Debug, Clone)]
pub enum OpenAccount {
    Savings(SavingsAccount),
    Checking(CheckingAccount),
}

impl OpenAccount {
    pub fn as_account(&self) -> &dyn Account {
        match self {
            OpenAccount::Savings(account) => account,
            OpenAccount::Checking(account) => account,
        }
    }

    pub fn as_account_mut(&mut self) -> &mut dyn Account {
        match self {
            OpenAccount::Savings(account) => account,
            OpenAccount::Checking(account) => account,
        }
    }
}

/// A simulated branch. Accounts are kept in opening order and account
/// numbers are unique within the branch.
pub struct SimulatedBranch {
    config: LedgerConfig,
    accounts: Vec<OpenAccount>,
}

impl SimulatedBranch {
    /// Create an empty branch that opens accounts under `config`.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            accounts: Vec::new(),
        }
    }

    /// Open a savings account.
    pub fn open_savings(
        &mut self,
        number: &str,
        customer: &str,
        initial_balance: Decimal,
        interest_rate: Decimal,
    ) -> anyhow::Result<&SavingsAccount> {
        let number = self.unused_number(number)?;
        let account = SavingsAccount::with_policy(
            number,
            customer,
            initial_balance,
            interest_rate,
            self.config.savings,
        )?;
        self.accounts.push(OpenAccount::Savings(account));
        match self.accounts.last() {
            Some(OpenAccount::Savings(account)) => Ok(account),
            _ => Err(anyhow!("savings account missing after open")),
        }
    }

    /// Open a checking account.
    pub fn open_checking(
        &mut self,
        number: &str,
        customer: &str,
        initial_balance: Decimal,
        overdraft_limit: Decimal,
    ) -> anyhow::Result<&CheckingAccount> {
        let number = self.unused_number(number)?;
        let account = CheckingAccount::with_policy(
            number,
            customer,
            initial_balance,
            overdraft_limit,
            self.config.checking,
        )?;
        self.accounts.push(OpenAccount::Checking(account));
        match self.accounts.last() {
            Some(OpenAccount::Checking(account)) => Ok(account),
            _ => Err(anyhow!("checking account missing after open")),
        }
    }

    /// Look up an account by number.
    pub fn get(&self, number: &str) -> anyhow::Result<&OpenAccount> {
        self.accounts
            .iter()
            .find(|a| a.as_account().account_number().as_str() == number)
            .ok_or_else(|| anyhow!("Unknown account: {}", number))
    }

    /// Look up an account by number for mutation.
    pub fn get_mut(&mut self, number: &str) -> anyhow::Result<&mut OpenAccount> {
        self.accounts
            .iter_mut()
            .find(|a| a.as_account().account_number().as_str() == number)
            .ok_or_else(|| anyhow!("Unknown account: {}", number))
    }

    /// Look up a savings account by number.
    pub fn savings_mut(&mut self, number: &str) -> anyhow::Result<&mut SavingsAccount> {
        match self.get_mut(number)? {
            OpenAccount::Savings(account) => Ok(account),
            OpenAccount::Checking(_) => Err(anyhow!("{} is not a savings account", number)),
        }
    }

    /// Look up a checking account by number.
    pub fn checking_mut(&mut self, number: &str) -> anyhow::Result<&mut CheckingAccount> {
        match self.get_mut(number)? {
            OpenAccount::Checking(account) => Ok(account),
            OpenAccount::Savings(_) => Err(anyhow!("{} is not a checking account", number)),
        }
    }

    /// All accounts in opening order.
    pub fn accounts(&self) -> impl Iterator<Item = &dyn Account> {
        self.accounts.iter().map(|a| a.as_account())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    fn unused_number(&self, number: &str) -> anyhow::Result<AccountNumber> {
        let number = AccountNumber::new(number)?;
        if self.get(number.as_str()).is_ok() {
            bail!("Account {} already exists", number);
        }
        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch() -> SimulatedBranch {
        SimulatedBranch::new(LedgerConfig::default())
    }

    #[test]
    fn test_open_and_lookup() {
        let mut branch = branch();
        branch
            .open_savings("SA001", "John Doe", Decimal::from(1000), Decimal::new(25, 1))
            .unwrap();
        branch
            .open_checking("CA001", "Jane Smith", Decimal::from(2000), Decimal::from(500))
            .unwrap();

        assert_eq!(branch.len(), 2);
        let numbers: Vec<_> = branch
            .accounts()
            .map(|a| a.account_number().to_string())
            .collect();
        assert_eq!(numbers, vec!["SA001", "CA001"]);
        assert!(branch.savings_mut("SA001").is_ok());
        assert!(branch.checking_mut("SA001").is_err());
        assert!(branch.get("XX999").is_err());
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let mut branch = branch();
        branch
            .open_savings("SA001", "John Doe", Decimal::from(1000), Decimal::ONE)
            .unwrap();

        let result = branch.open_checking("SA001", "Jane Smith", Decimal::ZERO, Decimal::ZERO);
        assert!(result.is_err());
        assert_eq!(branch.len(), 1);
    }

    #[test]
    fn test_branch_policy_applies_to_new_accounts() {
        let mut config = LedgerConfig::default();
        config.checking.transaction_fee = Decimal::from(2);
        let mut branch = SimulatedBranch::new(config);

        let account = branch
            .open_checking("CA001", "Jane Smith", Decimal::from(10), Decimal::ZERO)
            .unwrap();
        assert_eq!(account.transaction_fee(), Decimal::from(2));
    }
}
