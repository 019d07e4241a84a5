//! Typed IDs for type-safe entity references.
//!
//! Accounts are keyed by an externally assigned positive integer and
//! transactions by an opaque caller-supplied string. Wrapping both keeps a
//! raw `i64` or `String` from being passed where the other is expected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when constructing a typed ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Account IDs must be positive and fit in a signed 64-bit column.
    #[error("account id must be a positive integer")]
    InvalidAccountId,

    /// Transaction IDs must contain at least one non-whitespace character.
    #[error("transaction id is required")]
    EmptyTransactionId,
}

/// Unique identifier for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Creates an account ID, rejecting zero and negative values.
    ///
    /// # Errors
    ///
    /// Returns `IdError::InvalidAccountId` if `id <= 0`.
    pub const fn new(id: i64) -> Result<Self, IdError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(IdError::InvalidAccountId)
        }
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl TryFrom<u64> for AccountId {
    type Error = IdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let id = i64::try_from(value).map_err(|_| IdError::InvalidAccountId)?;
        Self::new(id)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = IdError;

    /// Accepts plain decimal digits only; a sign is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::InvalidAccountId);
        }
        let value: u64 = s.parse().map_err(|_| IdError::InvalidAccountId)?;
        Self::try_from(value)
    }
}

/// Caller-supplied idempotency key for one adjustment.
///
/// Unique across all accounts, not per account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(String);

impl TransactionId {
    /// Creates a transaction ID from a non-blank string.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EmptyTransactionId` if the string is empty or blank.
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdError::EmptyTransactionId);
        }
        Ok(Self(id))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TransactionId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TransactionId> for String {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
