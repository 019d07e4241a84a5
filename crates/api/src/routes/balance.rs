//! Balance query routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use purse_shared::types::money;
use serde::Serialize;

use super::parse_user_id;
use crate::{
    AppState,
    error::{invalid_request, map_ledger_error},
};

/// Creates the balance routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/user/{user_id}/balance", get(get_balance))
}

/// Response for a balance query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    /// Account ID.
    pub user_id: i64,
    /// Balance as a decimal string with exactly two fraction digits.
    pub balance: String,
}

/// GET /user/{user_id}/balance
async fn get_balance(State(state): State<AppState>, Path(user_id): Path<String>) -> Response {
    let Some(account_id) = parse_user_id(&user_id) else {
        return invalid_request("invalid userId in path");
    };

    match state.ledger.get_balance(account_id).await {
        Ok(balance) => (
            StatusCode::OK,
            Json(BalanceResponse {
                user_id: account_id.into_inner(),
                balance: money::encode(balance),
            }),
        )
            .into_response(),
        Err(e) => map_ledger_error(&e),
    }
}
