//! Ledger domain types for balance adjustments.
//!
//! An adjustment is a signed change to one account's balance, submitted by
//! an external caller under an idempotency key. Callers speak in terms of
//! "win" and "lose"; the ledger speaks in terms of increase and decrease.

use purse_shared::{AccountId, Amount, TransactionId};

use super::error::LedgerError;

/// Direction of a balance adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentKind {
    /// Adds to the balance ("win").
    Increase,
    /// Subtracts from the balance, never below zero ("lose").
    Decrease,
}

impl AdjustmentKind {
    /// Returns the caller-facing name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "win",
            Self::Decrease => "lose",
        }
    }
}

impl std::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdjustmentKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" => Ok(Self::Increase),
            "lose" => Ok(Self::Decrease),
            _ => Err(LedgerError::InvalidRequest("invalid state".to_string())),
        }
    }
}

/// Origin of an adjustment. Carried as metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// Game round settlement.
    Game,
    /// Server-initiated correction.
    Server,
    /// Payment provider.
    Payment,
}

impl SourceType {
    /// Returns the caller-facing name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Server => "server",
            Self::Payment => "payment",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "game" => Ok(Self::Game),
            "server" => Ok(Self::Server),
            "payment" => Ok(Self::Payment),
            _ => Err(LedgerError::InvalidRequest(
                "invalid Source-Type".to_string(),
            )),
        }
    }
}

/// A validated adjustment request.
///
/// Construction guarantees a positive amount and a non-blank transaction ID,
/// so the ledger never touches storage with malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    /// Target account.
    pub account_id: AccountId,
    /// Increase or decrease.
    pub kind: AdjustmentKind,
    /// Magnitude in minor units.
    pub amount: Amount,
    /// Idempotency key, unique across all accounts.
    pub transaction_id: TransactionId,
    /// Caller metadata; does not affect ledger logic.
    pub source: SourceType,
}

impl Adjustment {
    /// Builds an adjustment from raw caller input.
    ///
    /// Fields are checked in the order callers see errors for them:
    /// source, kind, amount, then transaction ID.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidRequest` for an unknown source or kind
    /// or a blank transaction ID, and `LedgerError::InvalidAmount` when the
    /// amount string does not decode.
    pub fn parse(
        account_id: AccountId,
        source: &str,
        kind: &str,
        amount: &str,
        transaction_id: &str,
    ) -> Result<Self, LedgerError> {
        let source: SourceType = source.parse()?;
        let kind: AdjustmentKind = kind.parse()?;
        let amount: Amount = amount.parse()?;
        let transaction_id = TransactionId::new(transaction_id)?;

        Ok(Self {
            account_id,
            kind,
            amount,
            transaction_id,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purse_shared::AmountError;
    use rstest::rstest;

    fn account(id: i64) -> AccountId {
        AccountId::new(id).unwrap()
    }

    #[rstest]
    #[case("win", AdjustmentKind::Increase)]
    #[case("WIN", AdjustmentKind::Increase)]
    #[case(" lose ", AdjustmentKind::Decrease)]
    fn test_kind_from_str(#[case] input: &str, #[case] expected: AdjustmentKind) {
        assert_eq!(input.parse::<AdjustmentKind>().unwrap(), expected);
    }

    #[test]
    fn test_kind_rejects_unknown() {
        assert!(matches!(
            "draw".parse::<AdjustmentKind>(),
            Err(LedgerError::InvalidRequest(_))
        ));
    }

    #[rstest]
    #[case("game", SourceType::Game)]
    #[case("Server", SourceType::Server)]
    #[case(" PAYMENT", SourceType::Payment)]
    fn test_source_from_str(#[case] input: &str, #[case] expected: SourceType) {
        assert_eq!(input.parse::<SourceType>().unwrap(), expected);
    }

    #[test]
    fn test_source_rejects_unknown() {
        assert!("bad-source".parse::<SourceType>().is_err());
        assert!("".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_parse_valid_adjustment() {
        let adj = Adjustment::parse(account(1), "game", "win", "10.15", "t1").unwrap();
        assert_eq!(adj.account_id, account(1));
        assert_eq!(adj.kind, AdjustmentKind::Increase);
        assert_eq!(adj.amount.minor(), 1015);
        assert_eq!(adj.transaction_id.as_str(), "t1");
        assert_eq!(adj.source, SourceType::Game);
    }

    #[test]
    fn test_parse_rejects_precision_before_storage() {
        let err = Adjustment::parse(account(3), "game", "win", "1.234", "t3").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidAmount(AmountError::TooManyFractionDigits)
        ));
    }

    #[test]
    fn test_parse_rejects_empty_transaction_id() {
        let err = Adjustment::parse(account(1), "game", "win", "1.00", "").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRequest(_)));
    }

    #[test]
    fn test_parse_checks_source_first() {
        let err = Adjustment::parse(account(1), "nope", "nope", "nope", "").unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: invalid Source-Type");
    }

    #[test]
    fn test_kind_display_roundtrip() {
        for kind in [AdjustmentKind::Increase, AdjustmentKind::Decrease] {
            assert_eq!(kind.to_string().parse::<AdjustmentKind>().unwrap(), kind);
        }
    }
}
