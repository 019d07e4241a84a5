//! Core ledger logic for Purse.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and balance arithmetic live here.
//!
//! # Modules
//!
//! - `ledger` - Adjustment requests, balance rules, and the ledger error taxonomy

pub mod ledger;
