//! Database seeder for Purse development and testing.
//!
//! Provisions accounts 1, 2 and 3 with a zero balance. Accounts that already
//! exist are left untouched, so the seeder can run any number of times.
//!
//! Usage: cargo run --bin seeder

use purse_db::entities::accounts;
use purse_shared::AppConfig;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};

/// Accounts provisioned for local development.
const SEED_ACCOUNT_IDS: [i64; 3] = [1, 2, 3];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = purse_db::connect(&config.database).await?;

    println!("Seeding accounts...");
    for id in SEED_ACCOUNT_IDS {
        seed_account(&db, id).await?;
    }

    println!("Seeding complete!");
    Ok(())
}

/// Seeds one zero-balance account unless it already exists.
async fn seed_account(db: &DatabaseConnection, id: i64) -> anyhow::Result<()> {
    if accounts::Entity::find_by_id(id).one(db).await?.is_some() {
        println!("  Account {id} already exists, skipping...");
        return Ok(());
    }

    accounts::ActiveModel {
        id: Set(id),
        balance: Set(0),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(db)
    .await?;

    println!("  Created account {id}");
    Ok(())
}
