//! Inclusive whole-day date-range filtering.

mod range;

pub use range::{DateRange, in_range, parse_day};
