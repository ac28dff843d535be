//! Simulation metrics.

use std::collections::BTreeMap;

use serde::Serialize;

use tallybank_common::LedgerError;

/// Counters for one scenario run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationMetrics {
    /// Account operations attempted.
    pub total_operations: u64,
    /// Operations the ledger accepted.
    pub successful_operations: u64,
    /// Operations the ledger rejected.
    pub rejected_operations: u64,
    /// Rejections keyed by error code.
    pub rejections_by_code: BTreeMap<&'static str, u64>,
    /// Assertion steps that held.
    pub assertions_passed: u64,
    /// Assertion steps that did not hold.
    pub assertions_failed: u64,
}

impl SimulationMetrics {
    /// Create new metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted operation.
    pub fn record_success(&mut self) {
        self.total_operations += 1;
        self.successful_operations += 1;
    }

    /// Record a rejected operation.
    pub fn record_rejection(&mut self, error: &LedgerError) {
        self.total_operations += 1;
        self.rejected_operations += 1;
        *self.rejections_by_code.entry(error.error_code()).or_insert(0) += 1;
    }

    /// Record the outcome of an assertion step.
    pub fn record_assertion(&mut self, passed: bool) {
        if passed {
            self.assertions_passed += 1;
        } else {
            self.assertions_failed += 1;
        }
    }

    /// Get success rate.
    pub fn success_rate(&self) -> f64 {
        if self.total_operations == 0 {
            return 0.0;
        }

        self.successful_operations as f64 / self.total_operations as f64
    }

    /// Check that every assertion held.
    pub fn all_assertions_passed(&self) -> bool {
        self.assertions_failed == 0
    }
}
