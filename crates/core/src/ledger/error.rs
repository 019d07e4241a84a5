//! Ledger error types.
//!
//! Every failure of a balance adjustment or balance query maps to exactly one
//! variant, so the boundary layer can pick a response without inspecting
//! message text.

use purse_shared::{AccountId, AmountError, IdError};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Amount string failed to decode.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// Malformed request field other than the amount.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Decrease would take the balance below zero.
    #[error("Insufficient funds on account {account_id}: requested {requested} minor units")]
    InsufficientFunds {
        /// The account ID.
        account_id: AccountId,
        /// Requested decrease in minor units.
        requested: i64,
    },

    // ========== Idempotency Errors ==========
    /// Transaction ID was already applied.
    #[error("Duplicate transaction: {0}")]
    DuplicateTransaction(String),

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<IdError> for LedgerError {
    fn from(err: IdError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::DuplicateTransaction(_) => "DUPLICATE_TRANSACTION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidAmount(_) | Self::InvalidRequest(_) => 400,

            // 404 Not Found
            Self::AccountNotFound(_) => 404,

            // 409 Conflict - balance and idempotency conflicts
            Self::InsufficientFunds { .. } | Self::DuplicateTransaction(_) => 409,

            // 500 Internal Server Error
            Self::Database(_) => 500,
        }
    }

    /// Returns true if the caller can treat this error as an applied adjustment.
    #[must_use]
    pub fn is_success_equivalent(&self) -> bool {
        matches!(self, Self::DuplicateTransaction(_))
    }

    /// Returns true if resending the identical request may succeed.
    ///
    /// Storage failures roll back completely, and the transaction ID makes a
    /// resend safe. Everything else is a deterministic rejection.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}
