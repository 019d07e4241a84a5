//! Account repository for balance storage.
//!
//! Every mutating method takes the caller's `DatabaseTransaction`; the
//! repository never opens or commits one itself. The only unlocked read is
//! [`AccountRepository::get_balance`], which serves status queries.

use purse_shared::AccountId;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect,
    sea_query::{Expr, SimpleExpr},
};

use crate::entities::accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Guarded decrease matched no row: the balance would go negative.
    #[error("Insufficient funds on account {account_id}")]
    InsufficientFunds {
        /// The account ID.
        account_id: AccountId,
        /// Requested decrease in minor units.
        requested: i64,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for balance reads and mutations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Confirms the account row exists.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if no row has this ID.
    pub async fn exists(
        &self,
        txn: &DatabaseTransaction,
        account_id: AccountId,
    ) -> Result<(), AccountError> {
        let count = accounts::Entity::find_by_id(account_id.into_inner())
            .count(txn)
            .await?;

        if count == 0 {
            return Err(AccountError::NotFound(account_id));
        }

        Ok(())
    }

    /// Reads the balance and takes an exclusive row lock (`FOR UPDATE`).
    ///
    /// The lock is held until `txn` commits or rolls back. A concurrent
    /// caller locking the same account waits here, which is what orders
    /// adjustments on one account.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if the row is absent.
    pub async fn lock_balance(
        &self,
        txn: &DatabaseTransaction,
        account_id: AccountId,
    ) -> Result<i64, AccountError> {
        accounts::Entity::find_by_id(account_id.into_inner())
            .select_only()
            .column(accounts::Column::Balance)
            .lock_exclusive()
            .into_tuple::<i64>()
            .one(txn)
            .await?
            .ok_or(AccountError::NotFound(account_id))
    }

    /// Adds `amount` minor units to the balance.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if no row was updated.
    pub async fn increase_balance(
        &self,
        txn: &DatabaseTransaction,
        account_id: AccountId,
        amount: i64,
    ) -> Result<(), AccountError> {
        let result = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).add(amount),
            )
            .col_expr(accounts::Column::UpdatedAt, SimpleExpr::from(Expr::current_timestamp()))
            .filter(accounts::Column::Id.eq(account_id.into_inner()))
            .exec(txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AccountError::NotFound(account_id));
        }

        Ok(())
    }

    /// Subtracts `amount` minor units only if the result stays `>= 0`.
    ///
    /// Check and subtract are one `UPDATE ... WHERE balance >= amount`, so no
    /// other writer can interleave between them whatever the isolation level.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InsufficientFunds` if no row matched, which
    /// includes the case of a missing account.
    pub async fn decrease_balance(
        &self,
        txn: &DatabaseTransaction,
        account_id: AccountId,
        amount: i64,
    ) -> Result<(), AccountError> {
        let result = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).sub(amount),
            )
            .col_expr(accounts::Column::UpdatedAt, SimpleExpr::from(Expr::current_timestamp()))
            .filter(accounts::Column::Id.eq(account_id.into_inner()))
            .filter(accounts::Column::Balance.gte(amount))
            .exec(txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AccountError::InsufficientFunds {
                account_id,
                requested: amount,
            });
        }

        Ok(())
    }

    /// Reads the balance without locking. Never use it to decide a mutation.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if the row is absent.
    pub async fn get_balance(&self, account_id: AccountId) -> Result<i64, AccountError> {
        accounts::Entity::find_by_id(account_id.into_inner())
            .select_only()
            .column(accounts::Column::Balance)
            .into_tuple::<i64>()
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(account_id))
    }
}
