//! Property-based tests for the amount codec.

use proptest::prelude::*;

use super::money::{AmountError, decode, encode};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Every positive minor-unit value survives encode then decode unchanged.
    #[test]
    fn prop_encode_decode_roundtrip(minor in 1i64..=i64::MAX) {
        prop_assert_eq!(decode(&encode(minor)), Ok(minor));
    }

    /// Encoded non-negative values always carry exactly two fractional digits.
    #[test]
    fn prop_encode_two_fraction_digits(minor in 0i64..=i64::MAX) {
        let encoded = encode(minor);
        let (int_part, frac_part) = encoded.split_once('.').expect("decimal point");
        prop_assert!(!int_part.is_empty());
        prop_assert!(int_part.bytes().all(|b| b.is_ascii_digit()));
        prop_assert_eq!(frac_part.len(), 2);
    }

    /// A third fractional digit is always rejected, whatever the value.
    #[test]
    fn prop_three_fraction_digits_rejected(int_part in 0u32..1_000_000, frac in 0u32..1000) {
        let input = format!("{int_part}.{frac:03}");
        prop_assert_eq!(decode(&input), Err(AmountError::TooManyFractionDigits));
    }

    /// Negative inputs never decode, regardless of magnitude.
    #[test]
    fn prop_negative_rejected(minor in 0i64..=i64::MAX) {
        let input = format!("-{}", encode(minor));
        prop_assert_eq!(decode(&input), Err(AmountError::NotPositive));
    }
}
