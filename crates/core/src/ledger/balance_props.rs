//! Property-based tests for balance rules.
//!
//! - Non-negativity: no sequence of adjustments drives a balance below zero
//! - Rejected decreases leave the balance untouched

use proptest::prelude::*;
use purse_shared::{AccountId, Amount};

use super::balance::apply_adjustment;
use super::error::LedgerError;
use super::types::AdjustmentKind;

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Amount> {
    (1i64..=1_000_000i64).prop_map(|minor| Amount::from_minor(minor).expect("positive"))
}

/// Strategy to generate adjustment kinds.
fn kind_strategy() -> impl Strategy<Value = AdjustmentKind> {
    prop_oneof![Just(AdjustmentKind::Increase), Just(AdjustmentKind::Decrease)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_balance_never_negative(
        steps in prop::collection::vec((kind_strategy(), positive_amount()), 1..50)
    ) {
        let account_id = AccountId::new(1).expect("positive id");
        let mut balance = 0i64;

        for (kind, amount) in steps {
            match apply_adjustment(account_id, balance, kind, amount) {
                Ok(next) => balance = next,
                Err(LedgerError::InsufficientFunds { .. }) => {
                    prop_assert_eq!(kind, AdjustmentKind::Decrease);
                    prop_assert!(balance < amount.minor());
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
            prop_assert!(balance >= 0);
        }
    }

    #[test]
    fn prop_decrease_exceeding_balance_rejected(
        balance in 0i64..1_000_000,
        excess in 1i64..1_000_000,
    ) {
        let account_id = AccountId::new(1).expect("positive id");
        let amount = Amount::from_minor(balance + excess).expect("positive");
        let result = apply_adjustment(account_id, balance, AdjustmentKind::Decrease, amount);
        let is_insufficient = matches!(result, Err(LedgerError::InsufficientFunds { .. }));
        prop_assert!(is_insufficient);
    }

    #[test]
    fn prop_increase_then_decrease_restores(
        start in 0i64..1_000_000,
        amount in positive_amount(),
    ) {
        let account_id = AccountId::new(1).expect("positive id");
        let raised = apply_adjustment(account_id, start, AdjustmentKind::Increase, amount)
            .expect("no overflow");
        let restored = apply_adjustment(account_id, raised, AdjustmentKind::Decrease, amount)
            .expect("funds available");
        prop_assert_eq!(restored, start);
    }
}
