//! Amount codec: exact conversion between decimal strings and minor units.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts cross the wire as decimal strings with at most two fractional
//! digits (`"10.15"`) and live everywhere else as a signed 64-bit count of
//! minor units (`1015`). No rounding is ever performed.

use rust_decimal::Decimal;
use thiserror::Error;

/// Number of fractional digits carried by the currency.
pub const FRACTION_DIGITS: u32 = 2;

/// Minor units in one major unit (10^`FRACTION_DIGITS`).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Reasons a decimal amount string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Input was empty or only whitespace.
    #[error("amount is required")]
    Empty,

    /// Missing integer digits, a dangling decimal point, or a bare sign.
    #[error("amount is malformed")]
    Malformed,

    /// More than one decimal point.
    #[error("amount has more than one decimal point")]
    MultipleDecimalPoints,

    /// A character other than an ASCII digit where a digit was expected.
    #[error("amount contains a non-digit character")]
    InvalidCharacter,

    /// More than two digits after the decimal point.
    #[error("amount supports up to 2 decimals")]
    TooManyFractionDigits,

    /// Magnitude does not fit in 64-bit minor units.
    #[error("amount is out of range")]
    OutOfRange,

    /// Decoded value is zero or negative.
    #[error("amount must be > 0")]
    NotPositive,
}

/// A strictly positive amount in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Wraps a minor-unit count, returning `None` unless it is `> 0`.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Option<Self> {
        if minor > 0 { Some(Self(minor)) } else { None }
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }
}

impl std::str::FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s).map(Self)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode(self.0))
    }
}

/// Decodes a decimal amount string into a positive count of minor units.
///
/// Accepted grammar, after trimming surrounding whitespace:
/// `[+|-] digits [ . digit [digit] ]`. A single fractional digit is padded
/// (`"1.5"` is `150`).
///
/// # Errors
///
/// Returns `AmountError` for empty or malformed input, non-digit characters,
/// more than two fractional digits, values that overflow `i64`, and any
/// result that is not strictly positive.
pub fn decode(input: &str) -> Result<i64, AmountError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let mut parts = unsigned.split('.');
    let int_part = parts.next().unwrap_or_default();
    let frac_part = parts.next();
    if parts.next().is_some() {
        return Err(AmountError::MultipleDecimalPoints);
    }

    if int_part.is_empty() {
        return Err(AmountError::Malformed);
    }
    if !is_ascii_digits(int_part) {
        return Err(AmountError::InvalidCharacter);
    }

    let fraction = match frac_part {
        None => 0,
        Some("") => return Err(AmountError::Malformed),
        Some(frac) if !is_ascii_digits(frac) => return Err(AmountError::InvalidCharacter),
        Some(frac) if frac.len() > FRACTION_DIGITS as usize => {
            return Err(AmountError::TooManyFractionDigits);
        }
        Some(frac) => {
            let value: i64 = frac.parse().map_err(|_| AmountError::InvalidCharacter)?;
            if frac.len() == 1 { value * 10 } else { value }
        }
    };

    // All-digit input only fails to parse on overflow.
    let integer: i64 = int_part.parse().map_err(|_| AmountError::OutOfRange)?;
    let total = integer
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .and_then(|v| v.checked_add(fraction))
        .ok_or(AmountError::OutOfRange)?;

    if negative || total == 0 {
        return Err(AmountError::NotPositive);
    }

    Ok(total)
}

/// Encodes minor units as `<integer>.<2-digit fraction>`.
///
/// Exact for every `i64`, including the extremes.
#[must_use]
pub fn encode(minor: i64) -> String {
    Decimal::new(minor, FRACTION_DIGITS).to_string()
}

fn is_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
