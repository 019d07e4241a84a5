//! Transaction repository for the applied-adjustment log.
//!
//! The `transactions` primary key is the idempotency key. A second insert of
//! the same ID fails with a unique violation, which is reported as
//! [`TransactionError::Duplicate`] and rolls back the surrounding unit.

use purse_shared::{AccountId, TransactionId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    NotSet, PaginatorTrait, QueryFilter, Set, SqlErr,
};

use crate::entities::transactions;

/// Error types for transaction log operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction ID is already recorded.
    #[error("Duplicate transaction: {0}")]
    Duplicate(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Maps an insert failure, separating key collisions from storage faults.
fn map_insert_error(err: DbErr, transaction_id: &TransactionId) -> TransactionError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            TransactionError::Duplicate(transaction_id.as_str().to_string())
        }
        _ => TransactionError::Database(err),
    }
}

/// Transaction repository for recording applied adjustments.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records `transaction_id` against `account_id` inside `txn`.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::Duplicate` if the ID is already recorded,
    /// for any account.
    pub async fn record(
        &self,
        txn: &DatabaseTransaction,
        transaction_id: &TransactionId,
        account_id: AccountId,
    ) -> Result<transactions::Model, TransactionError> {
        let row = transactions::ActiveModel {
            transaction_id: Set(transaction_id.as_str().to_string()),
            account_id: Set(account_id.into_inner()),
            created_at: NotSet,
        };

        row.insert(txn)
            .await
            .map_err(|e| map_insert_error(e, transaction_id))
    }

    /// Finds a recorded transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<transactions::Model>, TransactionError> {
        let row = transactions::Entity::find_by_id(transaction_id.as_str().to_string())
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Counts recorded transactions for an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_for_account(&self, account_id: AccountId) -> Result<u64, TransactionError> {
        let count = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account_id.into_inner()))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
