//! Common types used across the application.

pub mod id;
pub mod money;

#[cfg(test)]
mod money_props;

pub use id::{AccountId, IdError, TransactionId};
pub use money::{Amount, AmountError};
