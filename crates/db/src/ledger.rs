//! Ledger service: applies balance adjustments atomically.
//!
//! Each adjustment runs inside one [`AtomicUnit`]:
//!
//! 1. confirm the account exists
//! 2. lock the account row and read the balance
//! 3. pre-check against the locked balance, then increase or guarded decrease
//! 4. record the transaction ID (duplicate aborts the whole unit)
//! 5. commit
//!
//! Any failure in steps 1-4 rolls the unit back before the typed error is
//! returned, so no partial state is ever visible.

use purse_core::ledger::{self, Adjustment, AdjustmentKind, LedgerError};
use purse_shared::AccountId;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::{error, info, warn};

use crate::repositories::{AccountError, AccountRepository, TransactionError, TransactionRepository};
use crate::unit::{AtomicUnit, UnitExt};

impl From<AccountError> for LedgerError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(id) => Self::AccountNotFound(id),
            AccountError::InsufficientFunds {
                account_id,
                requested,
            } => Self::InsufficientFunds {
                account_id,
                requested,
            },
            AccountError::Database(e) => database_error(&e),
        }
    }
}

impl From<TransactionError> for LedgerError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Duplicate(id) => Self::DuplicateTransaction(id),
            TransactionError::Database(e) => database_error(&e),
        }
    }
}

/// Converts a storage failure into the opaque ledger variant.
fn database_error(err: &DbErr) -> LedgerError {
    LedgerError::Database(err.to_string())
}

/// Service that owns every balance mutation.
#[derive(Debug, Clone)]
pub struct LedgerService {
    db: DatabaseConnection,
    accounts: AccountRepository,
    transactions: TransactionRepository,
}

impl LedgerService {
    /// Creates a new ledger service on the given pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            transactions: TransactionRepository::new(db.clone()),
            db,
        }
    }

    /// Applies one adjustment exactly once.
    ///
    /// Adjustments on the same account are serialized by the row lock and
    /// applied in lock-acquisition order. A dropped future rolls back.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    /// - `InsufficientFunds` if a decrease exceeds the balance
    /// - `DuplicateTransaction` if the transaction ID was already applied
    /// - `InvalidRequest` if an increase would overflow the balance
    /// - `Database` on storage failure; the request is safe to resend
    pub async fn apply_adjustment(&self, adjustment: &Adjustment) -> Result<(), LedgerError> {
        let unit = self.db.begin_unit().await.map_err(|e| {
            error!(error = %e, "Failed to begin ledger transaction");
            database_error(&e)
        })?;

        match self.apply_in_unit(&unit, adjustment).await {
            Ok(balance) => {
                unit.commit().await.map_err(|e| {
                    error!(
                        account_id = %adjustment.account_id,
                        transaction_id = %adjustment.transaction_id,
                        error = %e,
                        "Failed to commit adjustment"
                    );
                    database_error(&e)
                })?;

                info!(
                    account_id = %adjustment.account_id,
                    transaction_id = %adjustment.transaction_id,
                    kind = %adjustment.kind,
                    amount_minor = adjustment.amount.minor(),
                    balance_minor = balance,
                    source = %adjustment.source,
                    "Adjustment committed"
                );
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = unit.rollback().await {
                    error!(
                        account_id = %adjustment.account_id,
                        transaction_id = %adjustment.transaction_id,
                        error = %rollback_err,
                        "Failed to roll back adjustment"
                    );
                }

                if err.is_retryable() {
                    error!(
                        account_id = %adjustment.account_id,
                        transaction_id = %adjustment.transaction_id,
                        error = %err,
                        "Adjustment failed"
                    );
                } else {
                    warn!(
                        account_id = %adjustment.account_id,
                        transaction_id = %adjustment.transaction_id,
                        code = err.error_code(),
                        "Adjustment rejected"
                    );
                }
                Err(err)
            }
        }
    }

    /// Runs steps 1-4 and returns the balance the unit will commit.
    async fn apply_in_unit(
        &self,
        unit: &AtomicUnit,
        adjustment: &Adjustment,
    ) -> Result<i64, LedgerError> {
        let txn = unit.transaction();
        let account_id = adjustment.account_id;
        let amount = adjustment.amount;

        self.accounts.exists(txn, account_id).await?;
        let balance = self.accounts.lock_balance(txn, account_id).await?;

        let next = ledger::apply_adjustment(account_id, balance, adjustment.kind, amount)?;

        match adjustment.kind {
            AdjustmentKind::Increase => {
                self.accounts
                    .increase_balance(txn, account_id, amount.minor())
                    .await?;
            }
            AdjustmentKind::Decrease => {
                self.accounts
                    .decrease_balance(txn, account_id, amount.minor())
                    .await?;
            }
        }

        self.transactions
            .record(txn, &adjustment.transaction_id, account_id)
            .await?;

        Ok(next)
    }

    /// Reads the balance without taking the row lock.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist, or `Database`
    /// on storage failure.
    pub async fn get_balance(&self, account_id: AccountId) -> Result<i64, LedgerError> {
        self.accounts.get_balance(account_id).await.map_err(|e| {
            if let AccountError::Database(ref db_err) = e {
                error!(account_id = %account_id, error = %db_err, "Failed to read balance");
            }
            LedgerError::from(e)
        })
    }

    /// Returns the account repository.
    #[must_use]
    pub const fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    /// Returns the transaction repository.
    #[must_use]
    pub const fn transactions(&self) -> &TransactionRepository {
        &self.transactions
    }
}
