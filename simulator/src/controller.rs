//! Simulation controller.

use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use tallybank_common::{format_amount, LedgerError};
use tallybank_ledger::{Account, AccountSummary, LedgerConfig, TransactionRecord};

use crate::bank::{OpenAccount, SimulatedBranch};
use crate::metrics::SimulationMetrics;
use crate::scenario::{Scenario, ScenarioStep};

/// Final state of one account, for export.
#[derive(Debug, Clone, Serialize)]
pub struct AccountReport {
    pub summary: AccountSummary,
    pub history: Vec<TransactionRecord>,
}

/// Runs scenarios against a simulated branch.
pub struct SimulationController {
    /// Accounts opened by the scenario.
    branch: SimulatedBranch,
    /// Simulation metrics.
    metrics: SimulationMetrics,
}

impl SimulationController {
    /// Create a controller whose branch opens accounts under `config`.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            branch: SimulatedBranch::new(config),
            metrics: SimulationMetrics::new(),
        }
    }

    /// Run every step of a scenario, writing human-readable output to `out`.
    ///
    /// Ledger rejections and failed assertions are counted in the metrics and
    /// do not stop the run. Unknown accounts, malformed steps and I/O errors do.
    pub fn run_scenario<W: Write>(&mut self, scenario: &Scenario, out: &mut W) -> anyhow::Result<()> {
        info!(
            scenario = %scenario.name,
            steps = scenario.steps.len(),
            "Running scenario: {}",
            scenario.description
        );

        for step in &scenario.steps {
            self.execute_step(step, out)?;
        }

        info!(
            scenario = %scenario.name,
            accounts = self.branch.len(),
            operations = self.metrics.total_operations,
            rejected = self.metrics.rejected_operations,
            "Scenario complete"
        );
        Ok(())
    }

    /// Get current metrics.
    pub fn get_metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    /// Summary and history of every account, in opening order.
    pub fn account_reports(&self) -> Vec<AccountReport> {
        self.branch
            .accounts()
            .map(|account| AccountReport {
                summary: account.summary(),
                history: account.transaction_history(),
            })
            .collect()
    }

    fn execute_step<W: Write>(&mut self, step: &ScenarioStep, out: &mut W) -> anyhow::Result<()> {
        match step {
            ScenarioStep::Section { title } => {
                writeln!(out, "\n{}", title)?;
            }

            ScenarioStep::OpenSavings {
                account,
                customer,
                initial_balance,
                interest_rate,
            } => {
                self.branch
                    .open_savings(account, customer, *initial_balance, *interest_rate)?;
                writeln!(out, "Opened savings account {} for {}", account, customer)?;
            }

            ScenarioStep::OpenChecking {
                account,
                customer,
                initial_balance,
                overdraft_limit,
            } => {
                self.branch
                    .open_checking(account, customer, *initial_balance, *overdraft_limit)?;
                writeln!(out, "Opened checking account {} for {}", account, customer)?;
            }

            ScenarioStep::Deposit { account, amount } => {
                let result = self.branch.get_mut(account)?.as_account_mut().deposit(*amount);
                if let Some(balance) = outcome(&mut self.metrics, out, account, "Deposit", result)? {
                    writeln!(
                        out,
                        "Deposited {} into {}. New balance: {}",
                        format_amount(*amount),
                        account,
                        format_amount(balance)
                    )?;
                }
            }

            ScenarioStep::Withdraw { account, amount } => {
                self.withdraw(account, *amount, out)?;
            }

            ScenarioStep::ApplyInterest { account } => {
                let result = self.branch.savings_mut(account)?.apply_interest();
                if let Some(interest) = outcome(&mut self.metrics, out, account, "Interest", result)? {
                    writeln!(
                        out,
                        "Interest applied to {}: {}",
                        account,
                        format_amount(interest)
                    )?;
                }
            }

            ScenarioStep::SetOverdraftLimit { account, limit } => {
                let result = self.branch.checking_mut(account)?.set_overdraft_limit(*limit);
                if outcome(&mut self.metrics, out, account, "Overdraft change", result)?.is_some() {
                    writeln!(
                        out,
                        "Overdraft limit for {} updated to {}",
                        account,
                        format_amount(*limit)
                    )?;
                }
            }

            ScenarioStep::Display { account: Some(account) } => {
                let info = self.branch.get(account)?.as_account().display_info();
                writeln!(out, "{}\n", info)?;
            }

            ScenarioStep::Display { account: None } => {
                for account in self.branch.accounts() {
                    writeln!(out, "{}\n", account.display_info())?;
                }
            }

            ScenarioStep::History { account } => {
                let history = self.branch.get(account)?.as_account().transaction_history();
                writeln!(out, "\n{} transactions ({}):", account, history.len())?;
                for record in &history {
                    writeln!(out, "  {}", record)?;
                }
            }

            ScenarioStep::AssertBalance { account, expected } => {
                let actual = self.branch.get(account)?.as_account().balance();
                let passed = actual == *expected;
                self.check(passed, out, || {
                    format!(
                        "{} balance is {}, expected {}",
                        account,
                        format_amount(actual),
                        format_amount(*expected)
                    )
                })?;
            }

            ScenarioStep::AssertHistoryLength { account, expected } => {
                let actual = self
                    .branch
                    .get(account)?
                    .as_account()
                    .core()
                    .history()
                    .len();
                self.check(actual == *expected, out, || {
                    format!("{} has {} records, expected {}", account, actual, expected)
                })?;
            }
        }

        Ok(())
    }

    fn withdraw<W: Write>(&mut self, account: &str, amount: Decimal, out: &mut W) -> anyhow::Result<()> {
        match self.branch.get_mut(account)? {
            OpenAccount::Savings(savings) => {
                let result = savings.withdraw(amount);
                if let Some(balance) = outcome(&mut self.metrics, out, account, "Withdrawal", result)? {
                    writeln!(
                        out,
                        "Withdrew {} from savings account {}. New balance: {}",
                        format_amount(amount),
                        account,
                        format_amount(balance)
                    )?;
                }
            }
            OpenAccount::Checking(checking) => {
                let result = checking.withdraw(amount);
                if let Some(balance) = outcome(&mut self.metrics, out, account, "Withdrawal", result)? {
                    writeln!(
                        out,
                        "Withdrew {} from checking account {}. Transaction fee: {}. New balance: {}",
                        format_amount(amount),
                        account,
                        format_amount(checking.transaction_fee()),
                        format_amount(balance)
                    )?;
                    if checking.is_overdrawn() {
                        writeln!(
                            out,
                            "Account {} is in overdraft. Current balance: {}",
                            account,
                            format_amount(balance)
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check<W: Write>(
        &mut self,
        passed: bool,
        out: &mut W,
        describe: impl FnOnce() -> String,
    ) -> anyhow::Result<()> {
        self.metrics.record_assertion(passed);
        if !passed {
            let message = describe();
            warn!(%message, "Assertion failed");
            writeln!(out, "ASSERTION FAILED: {}", message)?;
        }
        Ok(())
    }
}

/// Count a ledger result and report rejections. Returns the value on success.
fn outcome<T, W: Write>(
    metrics: &mut SimulationMetrics,
    out: &mut W,
    account: &str,
    operation: &str,
    result: Result<T, LedgerError>,
) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => {
            metrics.record_success();
            Ok(Some(value))
        }
        Err(err) => {
            metrics.record_rejection(&err);
            writeln!(out, "{} on {} rejected: {}", operation, account, err)?;
            Ok(None)
        }
    }
}
