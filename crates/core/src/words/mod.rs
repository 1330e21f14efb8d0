//! Amount-in-words rendering for receipts.
//!
//! Turns `1500.50 NGN` into `One thousand five hundred Naira and fifty Kobo
//! only`. The conversion is total: invalid input yields [`INVALID_AMOUNT`].

mod convert;

#[cfg(test)]
mod convert_props;

pub use convert::{INVALID_AMOUNT, amount_in_words, amount_in_words_f64, integer_to_words};
