//! TallyBank Simulator
//!
//! Runs scripted account scenarios against the ledger and reports the outcome.

use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tallybank_ledger::LedgerConfig;

mod bank;
mod controller;
mod metrics;
mod scenario;

use controller::{AccountReport, SimulationController};
use metrics::SimulationMetrics;
use scenario::Scenario;

/// TallyBank Simulator CLI
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Run savings and checking account scenarios")]
struct Args {
    /// Built-in scenario to run
    #[arg(short, long, default_value = "banking-demo")]
    scenario: String,

    /// Load the scenario from a JSON file instead
    #[arg(long, conflicts_with = "scenario")]
    scenario_file: Option<PathBuf>,

    /// List built-in scenarios and exit
    #[arg(long)]
    list: bool,

    /// Print a JSON report of final account state after the run
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Serialize)]
struct RunReport<'a> {
    scenario: &'a str,
    accounts: Vec<AccountReport>,
    metrics: &'a SimulationMetrics,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so scenario output on stdout stays clean
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    if args.list {
        for name in Scenario::names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = LedgerConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    info!("Starting TallyBank Simulator");
    info!("Minimum balance: {}", config.savings.minimum_balance);
    info!("Transaction fee: {}", config.checking.transaction_fee);

    let scenario = match &args.scenario_file {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::load(&args.scenario)?,
    };

    let mut controller = SimulationController::new(config);
    let stdout = io::stdout();
    controller.run_scenario(&scenario, &mut stdout.lock())?;

    let metrics = controller.get_metrics();
    if args.json {
        let report = RunReport {
            scenario: &scenario.name,
            accounts: controller.account_reports(),
            metrics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    info!("Simulation complete");
    info!("Total operations: {}", metrics.total_operations);
    info!("Successful: {}", metrics.successful_operations);
    info!("Rejected: {}", metrics.rejected_operations);
    info!("Success rate: {:.1}%", metrics.success_rate() * 100.0);

    if !metrics.all_assertions_passed() {
        bail!(
            "{} of {} assertions failed",
            metrics.assertions_failed,
            metrics.assertions_failed + metrics.assertions_passed
        );
    }

    Ok(())
}
