//! TallyBank Ledger Core
//!
//! Bank accounts with an append-only transaction log per account.
//!
//! Every account kind implements [`Account`]. Balances only move through
//! the account's own operations, and every move is logged with the balance
//! it produced. Withdrawal rules differ per kind:
//!
//! - [`SavingsAccount`] keeps the balance at or above a minimum and accrues
//!   interest on demand.
//! - [`CheckingAccount`] charges a fee on every withdrawal and may go
//!   negative down to its overdraft limit.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tallybank_common::AccountNumber;
//! use tallybank_ledger::{Account, CheckingAccount};
//!
//! let mut account = CheckingAccount::new(
//!     AccountNumber::new("CA001")?,
//!     "Jane Smith",
//!     Decimal::from(2000),
//!     Decimal::from(500),
//! )?;
//!
//! account.deposit(Decimal::from(300))?;
//! let balance = account.withdraw(Decimal::from(2500))?;
//! assert_eq!(balance, Decimal::new(-20150, 2));
//! # Ok::<(), tallybank_common::LedgerError>(())
//! ```

pub mod account;
pub mod journal;
pub mod config;
pub mod savings;
pub mod checking;
pub mod shared;

pub use account::{Account, AccountCore, AccountSummary, AccountType, SummaryField};
pub use journal::{TransactionKind, TransactionLog, TransactionRecord};
pub use config::{
    CheckingPolicy, LedgerConfig, SavingsPolicy, DEFAULT_MINIMUM_BALANCE, DEFAULT_TRANSACTION_FEE,
};
pub use savings::SavingsAccount;
pub use checking::CheckingAccount;
pub use shared::SharedAccount;
