//! Currency-aware numeric formatting and lenient parsing.
//!
//! These helpers sit between raw user input and the decimal arithmetic in the
//! core: text that is not a number becomes zero instead of an error, and every
//! displayed amount is rounded half away from zero to two places.

use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Largest amount accepted anywhere a bill takes money: 999,999,999,999.99.
///
/// Keeps every derived total well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Largest tax percentage accepted.
pub const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Clamps an amount into `0..=MAX_AMOUNT`.
#[must_use]
pub fn clamp_amount(amount: Decimal) -> Decimal {
    amount.clamp(Decimal::ZERO, MAX_AMOUNT)
}

/// Clamps a percentage into `0..=MAX_PERCENTAGE`.
#[must_use]
pub fn clamp_percentage(percentage: Decimal) -> Decimal {
    percentage.clamp(Decimal::ZERO, MAX_PERCENTAGE)
}

/// Rounds an amount to two decimal places, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with thousands separators and exactly two decimals.
///
/// `1500.5` becomes `1,500.50`, `-1234567` becomes `-1,234,567.00`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(2);

    let text = rounded.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + whole.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    out.push('.');
    out.push_str(fraction);
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parses user-typed amount text, coercing anything unusable to zero.
///
/// Grouping commas, underscores, whitespace and the `₦`/`$` symbols are
/// ignored. The sign and magnitude are preserved; callers bound the result
/// with [`clamp_amount`] or [`clamp_percentage`].
#[must_use]
pub fn parse_amount(input: &str) -> Decimal {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | '₦' | '$') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Parses a whole number of nights, coercing invalid or zero input to one.
#[must_use]
pub fn parse_nights(input: &str) -> u32 {
    input.trim().parse::<u32>().unwrap_or(1).max(1)
}
