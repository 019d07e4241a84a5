//! Initial ledger migration.
//!
//! Creates the accounts table (one non-negative balance per account) and the
//! transactions table (one row per applied adjustment, keyed by the caller's
//! transaction ID).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS transactions CASCADE;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS accounts CASCADE;")
            .await?;
        Ok(())
    }
}

const ACCOUNTS_SQL: &str = r"
-- Accounts are provisioned externally; ids are never reused
CREATE TABLE accounts (
    id BIGINT PRIMARY KEY,
    balance BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_accounts_id_positive CHECK (id > 0),
    CONSTRAINT chk_accounts_balance_non_negative CHECK (balance >= 0)
);
";

const TRANSACTIONS_SQL: &str = r"
-- Idempotency records: the primary key makes transaction ids globally unique
CREATE TABLE transactions (
    transaction_id TEXT PRIMARY KEY,
    account_id BIGINT NOT NULL REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_transactions_id_not_blank CHECK (length(btrim(transaction_id)) > 0)
);

-- Index for an account's transaction history
CREATE INDEX idx_transactions_account ON transactions(account_id, created_at DESC);
";
