//! Thread-safe handle around a single account.

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;

use tallybank_common::Result;

use crate::account::{Account, AccountSummary};
use crate::journal::TransactionRecord;

/// Shared, serialized access to one account.
///
/// Balance and log sit behind one mutex, so every operation on the same
/// account runs to completion before the next starts. Handles to different
/// accounts never contend.
#[derive(Debug)]
pub struct SharedAccount<A> {
    inner: Arc<Mutex<A>>,
}

impl<A> Clone for SharedAccount<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Account> SharedAccount<A> {
    /// Wrap an account for shared use.
    pub fn new(account: A) -> Self {
        Self {
            inner: Arc::new(Mutex::new(account)),
        }
    }

    pub fn deposit(&self, amount: Decimal) -> Result<Decimal> {
        self.inner.lock().deposit(amount)
    }

    pub fn withdraw(&self, amount: Decimal) -> Result<Decimal> {
        self.inner.lock().withdraw(amount)
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance()
    }

    pub fn transaction_history(&self) -> Vec<TransactionRecord> {
        self.inner.lock().transaction_history()
    }

    pub fn summary(&self) -> AccountSummary {
        self.inner.lock().summary()
    }

    /// Run `f` with exclusive access, for type-specific operations.
    pub fn with<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        let mut account = self.inner.lock();
        f(&mut account)
    }
}
