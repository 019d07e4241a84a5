//! Database layer with `SeaORM` entities, repositories, and the ledger service.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - The atomic unit of work and the ledger service built on it

pub mod entities;
pub mod ledger;
pub mod migration;
pub mod repositories;
pub mod unit;

pub use ledger::LedgerService;
pub use repositories::{AccountRepository, TransactionRepository};

use std::time::Duration;

use purse_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool to the database and verifies it.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    db.ping().await?;
    Ok(db)
}
