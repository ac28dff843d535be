//! Simulation scenarios.

use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A simulation scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Steps in the scenario.
    pub steps: Vec<ScenarioStep>,
}

/// A step in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Print a heading.
    Section { title: String },
    /// Open a savings account.
    OpenSavings {
        account: String,
        customer: String,
        initial_balance: Decimal,
        interest_rate: Decimal,
    },
    /// Open a checking account.
    OpenChecking {
        account: String,
        customer: String,
        initial_balance: Decimal,
        overdraft_limit: Decimal,
    },
    /// Deposit into an account.
    Deposit { account: String, amount: Decimal },
    /// Withdraw from an account.
    Withdraw { account: String, amount: Decimal },
    /// Credit interest on a savings account.
    ApplyInterest { account: String },
    /// Change a checking account's overdraft limit.
    SetOverdraftLimit { account: String, limit: Decimal },
    /// Print account summaries; all accounts when `account` is absent.
    Display {
        #[serde(default)]
        account: Option<String>,
    },
    /// Print an account's transaction history.
    History { account: String },
    /// Check an account's balance.
    AssertBalance { account: String, expected: Decimal },
    /// Check how many records an account has logged.
    AssertHistoryLength { account: String, expected: usize },
}

impl Scenario {
    /// Names of the built-in scenarios.
    pub fn names() -> &'static [&'static str] {
        &["banking-demo", "overdraft-edge", "interest-compounding"]
    }

    /// Load a built-in scenario by name.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name {
            "banking-demo" => Ok(Self::banking_demo()),
            "overdraft-edge" => Ok(Self::overdraft_edge()),
            "interest-compounding" => Ok(Self::interest_compounding()),
            _ => Err(anyhow::anyhow!("Unknown scenario: {}", name)),
        }
    }

    /// Load a scenario from a JSON file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario file {}", path.display()))
    }

    /// One savings and one checking account through deposits, withdrawals,
    /// interest and an overdraft change.
    fn banking_demo() -> Self {
        Self {
            name: "banking-demo".to_string(),
            description: "Savings and checking accounts through the standard operations".to_string(),
            steps: vec![
                ScenarioStep::OpenSavings {
                    account: "SA001".to_string(),
                    customer: "John Doe".to_string(),
                    initial_balance: Decimal::from(1000),
                    interest_rate: Decimal::new(25, 1),
                },
                ScenarioStep::OpenChecking {
                    account: "CA001".to_string(),
                    customer: "Jane Smith".to_string(),
                    initial_balance: Decimal::from(2000),
                    overdraft_limit: Decimal::from(500),
                },
                section("--- Initial Account Information ---"),
                ScenarioStep::Display { account: None },
                section("--- Performing Account Operations ---"),
                section("1. Testing deposits:"),
                deposit("SA001", Decimal::from(500)),
                deposit("CA001", Decimal::from(300)),
                section("2. Testing withdrawals:"),
                // 1500 - 1300 = 200 stays above the 100 minimum
                withdraw("SA001", Decimal::from(1300)),
                withdraw("SA001", Decimal::from(200)),
                withdraw("CA001", Decimal::from(2500)),
                section("3. Testing account-specific operations:"),
                ScenarioStep::ApplyInterest {
                    account: "SA001".to_string(),
                },
                ScenarioStep::SetOverdraftLimit {
                    account: "CA001".to_string(),
                    limit: Decimal::from(1000),
                },
                section("--- Updated Account Information ---"),
                ScenarioStep::Display { account: None },
                section("--- Transaction History ---"),
                history("SA001"),
                history("CA001"),
                assert_balance("SA001", Decimal::from(205)),
                assert_balance("CA001", Decimal::new(-20150, 2)),
            ],
        }
    }

    /// Checking account driven to its overdraft limit and back.
    fn overdraft_edge() -> Self {
        Self {
            name: "overdraft-edge".to_string(),
            description: "Checking withdrawals at the overdraft boundary".to_string(),
            steps: vec![
                ScenarioStep::OpenChecking {
                    account: "CA010".to_string(),
                    customer: "Sam Park".to_string(),
                    initial_balance: Decimal::from(100),
                    overdraft_limit: Decimal::from(50),
                },
                // 148.50 + 1.50 fee uses the whole 150 available
                withdraw("CA010", Decimal::new(14850, 2)),
                assert_balance("CA010", Decimal::from(-50)),
                withdraw("CA010", Decimal::new(1, 2)),
                ScenarioStep::SetOverdraftLimit {
                    account: "CA010".to_string(),
                    limit: Decimal::from(25),
                },
                deposit("CA010", Decimal::from(100)),
                ScenarioStep::SetOverdraftLimit {
                    account: "CA010".to_string(),
                    limit: Decimal::ZERO,
                },
                withdraw("CA010", Decimal::from(-5)),
                assert_balance("CA010", Decimal::from(50)),
                ScenarioStep::AssertHistoryLength {
                    account: "CA010".to_string(),
                    expected: 4,
                },
                ScenarioStep::Display {
                    account: Some("CA010".to_string()),
                },
                history("CA010"),
            ],
        }
    }

    /// Repeated interest on a savings account, then a withdrawal to the floor.
    fn interest_compounding() -> Self {
        Self {
            name: "interest-compounding".to_string(),
            description: "Interest compounding on caller-triggered applications".to_string(),
            steps: vec![
                ScenarioStep::OpenSavings {
                    account: "SA010".to_string(),
                    customer: "Ravi Patel".to_string(),
                    initial_balance: Decimal::from(1000),
                    interest_rate: Decimal::from(10),
                },
                ScenarioStep::ApplyInterest {
                    account: "SA010".to_string(),
                },
                ScenarioStep::ApplyInterest {
                    account: "SA010".to_string(),
                },
                ScenarioStep::ApplyInterest {
                    account: "SA010".to_string(),
                },
                assert_balance("SA010", Decimal::from(1331)),
                withdraw("SA010", Decimal::from(1231)),
                withdraw("SA010", Decimal::ONE),
                assert_balance("SA010", Decimal::from(100)),
                ScenarioStep::AssertHistoryLength {
                    account: "SA010".to_string(),
                    expected: 5,
                },
                history("SA010"),
            ],
        }
    }
}

fn section(title: &str) -> ScenarioStep {
    ScenarioStep::Section {
        title: title.to_string(),
    }
}

fn deposit(account: &str, amount: Decimal) -> ScenarioStep {
    ScenarioStep::Deposit {
        account: account.to_string(),
        amount,
    }
}

fn withdraw(account: &str, amount: Decimal) -> ScenarioStep {
    ScenarioStep::Withdraw {
        account: account.to_string(),
        amount,
    }
}

fn history(account: &str) -> ScenarioStep {
    ScenarioStep::History {
        account: account.to_string(),
    }
}

fn assert_balance(account: &str, expected: Decimal) -> ScenarioStep {
    ScenarioStep::AssertBalance {
        account: account.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenarios_load() {
        for name in Scenario::names() {
            let scenario = Scenario::load(name).unwrap();
            assert_eq!(scenario.name, *name);
            assert!(!scenario.steps.is_empty());
        }
        assert!(Scenario::load("no-such-scenario").is_err());
    }

    #[test]
    fn test_step_json_shape() {
        let json = r#"[
            {"type": "open_checking", "account": "CA001", "customer": "Jane Smith",
             "initial_balance": "2000.00", "overdraft_limit": 500},
            {"type": "withdraw", "account": "CA001", "amount": "2500"},
            {"type": "display"}
        ]"#;

        let steps: Vec<ScenarioStep> = serde_json::from_str(json).unwrap();

        assert_eq!(steps.len(), 3);
        assert_eq!(
            steps[1],
            ScenarioStep::Withdraw {
                account: "CA001".to_string(),
                amount: Decimal::from(2500),
            }
        );
        assert_eq!(steps[2], ScenarioStep::Display { account: None });
    }

    #[test]
    fn test_scenario_round_trips_through_json() {
        let scenario = Scenario::load("banking-demo").unwrap();
        let json = serde_json::to_string(&scenario).unwrap();
        let parsed: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.steps, scenario.steps);
    }
}
