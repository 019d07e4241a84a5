//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for balance queries and adjustments
//! - Mapping from ledger errors to HTTP responses
//! - The middleware stack (tracing, request IDs, timeouts, CORS)

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{Router, http::HeaderName};
use purse_db::LedgerService;
use purse_shared::config::ServerConfig;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly only for health checks.
    pub db: DatabaseConnection,
    /// Ledger service owning every balance mutation.
    pub ledger: Arc<LedgerService>,
}

impl AppState {
    /// Builds the state on a database pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            ledger: Arc::new(LedgerService::new(db.clone())),
            db,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::api_routes())
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
