//! Balance adjustment routes.
//!
//! Validation runs in a fixed order before the ledger is touched: path ID,
//! `Source-Type` header, JSON body, state, amount, transaction ID. The body is
//! decoded as JSON whatever its `Content-Type`.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use purse_core::ledger::{Adjustment, SourceType};
use serde::Deserialize;
use serde_json::json;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::debug;

use super::parse_user_id;
use crate::{
    AppState,
    error::{invalid_request, map_ledger_error},
};

/// Maximum accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 1 << 20;

/// Header naming the origin of an adjustment.
pub const SOURCE_TYPE_HEADER: &str = "Source-Type";

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/{user_id}/transaction", post(process_transaction))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

/// Request body for an adjustment.
///
/// Missing fields deserialize as empty strings so each one gets its own
/// validation message.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TransactionRequest {
    /// `win` or `lose`.
    pub state: String,
    /// Decimal amount with up to two fraction digits.
    pub amount: String,
    /// Idempotency key.
    pub transaction_id: String,
}

/// POST /user/{user_id}/transaction
async fn process_transaction(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(account_id) = parse_user_id(&user_id) else {
        return invalid_request("invalid userId in path");
    };

    let source = headers
        .get(SOURCE_TYPE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if let Err(e) = source.parse::<SourceType>() {
        return map_ledger_error(&e);
    }

    if body.trim_ascii().is_empty() {
        return invalid_request("empty body");
    }
    let req: TransactionRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            debug!(error = %e, "Rejected transaction body");
            return invalid_request("invalid JSON");
        }
    };

    let adjustment = match Adjustment::parse(
        account_id,
        source,
        &req.state,
        &req.amount,
        &req.transaction_id,
    ) {
        Ok(adjustment) => adjustment,
        Err(e) => return map_ledger_error(&e),
    };

    match state.ledger.apply_adjustment(&adjustment).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response(),
        Err(e) => map_ledger_error(&e),
    }
}
