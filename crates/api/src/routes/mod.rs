//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod balance;
pub mod health;
pub mod transaction;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(balance::routes())
        .merge(transaction::routes())
}

/// Parses the `{user_id}` path segment into a positive account ID.
pub(crate) fn parse_user_id(raw: &str) -> Option<purse_shared::AccountId> {
    raw.parse().ok()
}
