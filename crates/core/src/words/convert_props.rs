//! Property-based tests for amount-in-words rendering.

use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_shared::types::Currency;

use super::convert::{INVALID_AMOUNT, amount_in_words, integer_to_words};

/// Strategy for amounts from 0.00 to 10 billion with two decimals.
fn cents_amount() -> impl Strategy<Value = (i64, Decimal)> {
    (0i64..1_000_000_000_000i64).prop_map(|cents| (cents, Decimal::new(cents, 2)))
}

fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Ngn), Just(Currency::Usd)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every valid amount produces a capitalized phrase ending in "only".
    #[test]
    fn prop_phrase_shape((_, amount) in cents_amount(), currency in currency_strategy()) {
        let phrase = amount_in_words(amount, currency);

        prop_assert!(phrase.ends_with(" only"));
        prop_assert!(phrase.chars().next().is_some_and(char::is_uppercase));
        prop_assert!(phrase.contains(currency.major_unit()));
    }

    /// The minor clause appears exactly when the amount has cents.
    #[test]
    fn prop_minor_clause_iff_cents((cents, amount) in cents_amount(), currency in currency_strategy()) {
        let phrase = amount_in_words(amount, currency);
        let has_minor = phrase.ends_with(&format!("{} only", currency.minor_unit()));

        prop_assert_eq!(has_minor, cents % 100 != 0);
    }

    /// The major words are exactly the integer rendering of the whole part.
    #[test]
    fn prop_major_words_match_integer((cents, amount) in cents_amount()) {
        let phrase = amount_in_words(amount, Currency::Usd);
        let major = u128::try_from(cents / 100).unwrap();
        let prefix = format!("{} dollars", integer_to_words(major));

        prop_assert!(phrase.to_lowercase().starts_with(&prefix));
    }

    /// Zero chunks never produce scale words on their own.
    #[test]
    fn prop_no_zero_scale_words(value in 0u128..1_000_000_000_000_000u128) {
        let words = integer_to_words(value);
        prop_assert!(!words.contains("zero thousand"));
        prop_assert!(!words.contains("zero million"));
        prop_assert!(value == 0 || !words.contains("zero"));
    }

    /// Negative amounts always yield the sentinel.
    #[test]
    fn prop_negative_is_invalid(cents in 1i64..1_000_000_000i64) {
        prop_assert_eq!(amount_in_words(Decimal::new(-cents, 2), Currency::Ngn), INVALID_AMOUNT);
    }
}
