//! Shared types and configuration for Purse.
//!
//! This crate provides common types used across all other crates:
//! - The amount codec (decimal strings <-> integer minor units)
//! - Typed IDs for accounts and transactions
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{AccountId, Amount, AmountError, IdError, TransactionId};
