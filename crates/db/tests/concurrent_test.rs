//! Concurrent access tests for balance adjustments.
//!
//! These tests verify that:
//! - Two concurrent decreases whose sum exceeds the balance never both succeed
//! - Many concurrent increases on one account sum exactly
//! - Concurrent submissions of one transaction ID apply exactly once

#![allow(clippy::cast_possible_wrap)]

mod common;

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Barrier;

use common::{account, adjustment, seed_account, setup_test_db};
use purse_core::ledger::LedgerError;

#[tokio::test]
async fn test_concurrent_decreases_serialize() {
    let test_db = setup_test_db().await;
    seed_account(&test_db.db, 1, 1000).await;
    let ledger = Arc::new(test_db.ledger());
    let barrier = Arc::new(Barrier::new(2));

    let tasks = ["d1", "d2"].into_iter().map(|txid| {
        let ledger = Arc::clone(&ledger);
        let barrier = Arc::clone(&barrier);
        tokio::spawn(async move {
            barrier.wait().await;
            ledger
                .apply_adjustment(&adjustment(1, "lose", "6.00", txid))
                .await
        })
    });

    let results: Vec<Result<(), LedgerError>> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let rejections = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::InsufficientFunds { .. })))
        .count();

    assert_eq!(successes, 1, "results: {results:?}");
    assert_eq!(rejections, 1, "results: {results:?}");
    assert_eq!(ledger.get_balance(account(1)).await.unwrap(), 400);
}

#[tokio::test]
async fn test_concurrent_increases_sum_exactly() {
    const TASKS: usize = 40;

    let test_db = setup_test_db().await;
    seed_account(&test_db.db, 1, 0).await;
    let ledger = Arc::new(test_db.ledger());
    let barrier = Arc::new(Barrier::new(TASKS));

    let tasks = (0..TASKS).map(|i| {
        let ledger = Arc::clone(&ledger);
        let barrier = Arc::clone(&barrier);
        tokio::spawn(async move {
            barrier.wait().await;
            ledger
                .apply_adjustment(&adjustment(1, "win", "1.25", &format!("inc-{i}")))
                .await
        })
    });

    for joined in join_all(tasks).await {
        joined.unwrap().unwrap();
    }

    assert_eq!(
        ledger.get_balance(account(1)).await.unwrap(),
        125 * TASKS as i64
    );
    assert_eq!(
        ledger.transactions().count_for_account(account(1)).await.unwrap(),
        TASKS as u64
    );
}

#[tokio::test]
async fn test_concurrent_duplicates_apply_once() {
    const TASKS: usize = 8;

    let test_db = setup_test_db().await;
    seed_account(&test_db.db, 1, 0).await;
    seed_account(&test_db.db, 2, 0).await;
    let ledger = Arc::new(test_db.ledger());
    let barrier = Arc::new(Barrier::new(TASKS));

    // Half the submissions target a different account with the same ID.
    let tasks = (0..TASKS).map(|i| {
        let ledger = Arc::clone(&ledger);
        let barrier = Arc::clone(&barrier);
        let account_id = if i % 2 == 0 { 1 } else { 2 };
        tokio::spawn(async move {
            barrier.wait().await;
            ledger
                .apply_adjustment(&adjustment(account_id, "win", "10.00", "same-id"))
                .await
        })
    });

    let results: Vec<Result<(), LedgerError>> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::DuplicateTransaction(_))))
        .count();
    assert_eq!(successes, 1, "results: {results:?}");
    assert_eq!(duplicates, TASKS - 1, "results: {results:?}");

    let total = ledger.get_balance(account(1)).await.unwrap()
        + ledger.get_balance(account(2)).await.unwrap();
    assert_eq!(total, 1000);
}

#[tokio::test]
async fn test_mixed_adjustments_never_go_negative() {
    const TASKS: usize = 30;

    let test_db = setup_test_db().await;
    seed_account(&test_db.db, 1, 500).await;
    let ledger = Arc::new(test_db.ledger());
    let barrier = Arc::new(Barrier::new(TASKS));

    let tasks = (0..TASKS).map(|i| {
        let ledger = Arc::clone(&ledger);
        let barrier = Arc::clone(&barrier);
        let state = if i % 3 == 0 { "win" } else { "lose" };
        tokio::spawn(async move {
            barrier.wait().await;
            let result = ledger
                .apply_adjustment(&adjustment(1, state, "1.00", &format!("mix-{i}")))
                .await;
            (state, result)
        })
    });

    let mut expected = 500i64;
    for joined in join_all(tasks).await {
        let (state, result) = joined.unwrap();
        match (state, result) {
            ("win", Ok(())) => expected += 100,
            ("lose", Ok(())) => expected -= 100,
            ("lose", Err(LedgerError::InsufficientFunds { .. })) => {}
            (state, other) => panic!("unexpected {state} result: {other:?}"),
        }
    }

    let balance = ledger.get_balance(account(1)).await.unwrap();
    assert!(balance >= 0);
    assert_eq!(balance, expected);
}
