//! Balance ledger logic.
//!
//! This module implements the storage-independent half of the ledger:
//! - Adjustment requests (win/lose) and their validation
//! - Balance rules (non-negative floor, overflow guard)
//! - Error types for ledger operations

pub mod balance;
pub mod error;
pub mod types;

#[cfg(test)]
mod balance_props;

pub use balance::{apply_adjustment, has_sufficient_funds};
pub use error::LedgerError;
pub use types::{Adjustment, AdjustmentKind, SourceType};
