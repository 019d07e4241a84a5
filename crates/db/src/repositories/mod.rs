//! Repository abstractions for data access.
//!
//! Repositories hide the `SeaORM` queries from the ledger service. Methods
//! that mutate state take the caller's open transaction.

pub mod account;
pub mod transaction;

pub use account::{AccountError, AccountRepository};
pub use transaction::{TransactionError, TransactionRepository};
