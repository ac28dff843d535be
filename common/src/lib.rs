//! TallyBank Common Types
//!
//! This crate contains shared types used across the TallyBank workspace,
//! including identifiers, monetary helpers, timestamps and the ledger error
//! taxonomy.

pub mod identifiers;
pub mod monetary;
pub mod error;
pub mod time;

pub use identifiers::*;
pub use monetary::*;
pub use error::*;
pub use time::*;
