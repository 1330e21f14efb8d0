//! Recursive three-digit chunking of amounts into English words.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use folio_shared::types::Currency;

/// Sentinel returned for NaN, infinite or negative amounts.
pub const INVALID_AMOUNT: &str = "Invalid Amount";

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

// Index = number of three-digit groups below the chunk. Long enough for u128::MAX.
const SCALES: [&str; 13] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
    "sextillion",
    "septillion",
    "octillion",
    "nonillion",
    "decillion",
    "undecillion",
];

/// Renders an amount and currency as a receipt phrase.
///
/// The fractional part is rounded to whole minor units (half away from zero);
/// 100 minor units carry into the major unit. The minor clause is omitted
/// when it rounds to zero.
///
/// # Example
///
/// ```
/// use folio_core::words::amount_in_words;
/// use folio_shared::types::Currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     amount_in_words(dec!(1500.50), Currency::Ngn),
///     "One thousand five hundred Naira and fifty Kobo only"
/// );
/// ```
#[must_use]
pub fn amount_in_words(amount: Decimal, currency: Currency) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        return INVALID_AMOUNT.to_string();
    }

    let Some((major, minor)) = split_units(amount) else {
        return INVALID_AMOUNT.to_string();
    };

    let mut phrase = format!(
        "{} {}",
        capitalize(&integer_to_words(major)),
        currency.major_unit()
    );

    if minor > 0 {
        phrase.push_str(" and ");
        phrase.push_str(&integer_to_words(u128::from(minor)));
        phrase.push(' ');
        phrase.push_str(currency.minor_unit());
    }

    phrase.push_str(" only");
    phrase
}

/// Same as [`amount_in_words`] for amounts that arrive as floats from a form.
#[must_use]
pub fn amount_in_words_f64(amount: f64, currency: Currency) -> String {
    if !amount.is_finite() || amount < 0.0 {
        return INVALID_AMOUNT.to_string();
    }

    match Decimal::from_f64(amount) {
        Some(value) => amount_in_words(value, currency),
        None => INVALID_AMOUNT.to_string(),
    }
}

/// Converts a whole number to lowercase words; `0` is `"zero"`.
#[must_use]
pub fn integer_to_words(value: u128) -> String {
    if value == 0 {
        return ONES[0].to_string();
    }

    let mut parts = Vec::new();
    push_chunks(value, 0, &mut parts);
    parts.join(" ")
}

/// Splits into (major, minor) with the 100-minor-unit carry applied.
fn split_units(amount: Decimal) -> Option<(u128, u32)> {
    let whole = amount.trunc();
    let fraction = (amount - whole) * Decimal::ONE_HUNDRED;
    let mut minor = fraction
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()?;
    let mut major = whole.to_u128()?;

    if minor == 100 {
        major = major.checked_add(1)?;
        minor = 0;
    }

    Some((major, minor))
}

/// Pushes the words for `value`, highest chunk first.
fn push_chunks(value: u128, scale: usize, parts: &mut Vec<String>) {
    if value == 0 {
        return;
    }

    push_chunks(value / 1000, scale + 1, parts);

    let chunk = usize::try_from(value % 1000).unwrap_or_default();
    if chunk == 0 {
        return;
    }

    parts.push(below_thousand(chunk));
    if let Some(scale_word) = SCALES.get(scale).filter(|word| !word.is_empty()) {
        parts.push((*scale_word).to_string());
    }
}

fn below_thousand(n: usize) -> String {
    match n {
        0..=19 => ONES[n].to_string(),
        20..=99 => {
            let tens = TENS[n / 10];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{tens} {}", ONES[ones]),
            }
        }
        _ => {
            let hundreds = format!("{} hundred", ONES[n / 100]);
            match n % 100 {
                0 => hundreds,
                rest => format!("{hundreds} and {}", below_thousand(rest)),
            }
        }
    }
}

fn capitalize(words: &str) -> String {
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
