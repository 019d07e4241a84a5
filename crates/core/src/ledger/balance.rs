//! Account balance rules.
//!
//! Balances are non-negative counts of minor units. These functions decide
//! whether an adjustment is allowed against a balance already read under the
//! account's row lock; the storage layer enforces the same floor again when
//! it applies the change.

use purse_shared::{AccountId, Amount};

use super::error::LedgerError;
use super::types::AdjustmentKind;

/// Returns true if `balance` covers a decrease of `amount`.
#[must_use]
pub const fn has_sufficient_funds(balance: i64, amount: Amount) -> bool {
    balance >= amount.minor()
}

/// Computes the balance that results from applying an adjustment.
///
/// # Errors
///
/// - `InsufficientFunds` when a decrease exceeds the balance
/// - `InvalidRequest` when an increase would overflow 64-bit minor units
pub fn apply_adjustment(
    account_id: AccountId,
    balance: i64,
    kind: AdjustmentKind,
    amount: Amount,
) -> Result<i64, LedgerError> {
    match kind {
        AdjustmentKind::Increase => balance.checked_add(amount.minor()).ok_or_else(|| {
            LedgerError::InvalidRequest("resulting balance is out of range".to_string())
        }),
        AdjustmentKind::Decrease => {
            if has_sufficient_funds(balance, amount) {
                Ok(balance - amount.minor())
            } else {
                Err(LedgerError::InsufficientFunds {
                    account_id,
                    requested: amount.minor(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> AccountId {
        AccountId::new(1).unwrap()
    }

    fn amount(minor: i64) -> Amount {
        Amount::from_minor(minor).unwrap()
    }

    #[test]
    fn test_increase() {
        let result = apply_adjustment(account(), 0, AdjustmentKind::Increase, amount(1015));
        assert_eq!(result.unwrap(), 1015);
    }

    #[test]
    fn test_decrease_to_zero() {
        let result = apply_adjustment(account(), 300, AdjustmentKind::Decrease, amount(300));
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_decrease_below_zero_rejected() {
        let result = apply_adjustment(account(), 0, AdjustmentKind::Decrease, amount(100));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds { requested: 100, .. })
        ));
    }

    #[test]
    fn test_increase_overflow_rejected() {
        let result = apply_adjustment(account(), i64::MAX, AdjustmentKind::Increase, amount(1));
        assert!(matches!(result, Err(LedgerError::InvalidRequest(_))));
    }

    #[test]
    fn test_has_sufficient_funds() {
        assert!(has_sufficient_funds(100, amount(100)));
        assert!(has_sufficient_funds(101, amount(100)));
        assert!(!has_sufficient_funds(99, amount(100)));
    }
}
