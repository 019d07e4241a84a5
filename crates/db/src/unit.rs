//! Atomic unit of work.
//!
//! An [`AtomicUnit`] wraps one database transaction. Every read and write of
//! a balance adjustment goes through [`AtomicUnit::transaction`], and the
//! unit ends in exactly one of [`AtomicUnit::commit`] or
//! [`AtomicUnit::rollback`].
//!
//! # Usage
//!
//! ```ignore
//! use purse_db::unit::UnitExt;
//!
//! let unit = db.begin_unit().await?;
//! let balance = accounts.lock_balance(unit.transaction(), account_id).await?;
//! unit.commit().await?;
//! ```
//!
//! Dropping a unit without committing rolls it back. This covers a request
//! future that is cancelled mid-flight.

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

/// A database transaction scoped to one balance adjustment.
pub struct AtomicUnit {
    txn: DatabaseTransaction,
}

impl AtomicUnit {
    /// Begins a new unit on the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be acquired or `BEGIN` fails.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let txn = db.begin().await?;
        Ok(Self { txn })
    }

    /// Returns the underlying transaction for executing queries.
    #[must_use]
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commits the unit, making all its writes visible together.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails. Nothing is persisted then.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    /// Rolls back the unit, discarding all its writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}

/// Extension trait for `DatabaseConnection` to begin atomic units.
#[async_trait::async_trait]
pub trait UnitExt {
    /// Begins an atomic unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit cannot be started.
    async fn begin_unit(&self) -> Result<AtomicUnit, DbErr>;
}

#[async_trait::async_trait]
impl UnitExt for DatabaseConnection {
    async fn begin_unit(&self) -> Result<AtomicUnit, DbErr> {
        AtomicUnit::begin(self).await
    }
}
