//! Error responses.
//!
//! Every error body has the shape `{"error": CODE, "message": text}`. Storage
//! failures never leak their message to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use purse_core::ledger::LedgerError;
use serde_json::json;

/// Builds an error response from a status, code, and message.
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Maps ledger errors to HTTP responses.
pub fn map_ledger_error(e: &LedgerError) -> Response {
    let status = StatusCode::from_u16(e.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match e {
        LedgerError::InvalidAmount(inner) => inner.to_string(),
        LedgerError::InvalidRequest(reason) => reason.clone(),
        LedgerError::AccountNotFound(_) => "user not found".to_string(),
        LedgerError::InsufficientFunds { .. } => "insufficient funds".to_string(),
        LedgerError::DuplicateTransaction(_) => "duplicate transaction".to_string(),
        LedgerError::Database(_) => "internal error".to_string(),
    };

    error_response(status, e.error_code(), message)
}

/// Shorthand for a 400 `INVALID_REQUEST` response.
pub fn invalid_request(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message)
}
