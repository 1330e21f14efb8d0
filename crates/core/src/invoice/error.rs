//! Invoice error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Raw fields that cannot produce a bill.
///
/// Only stored payloads can hit these: every constructor and update clamps
/// its inputs first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotalsError {
    /// A raw field is larger than any bill accepts.
    #[error("{field} is out of range: {value}")]
    OutOfRange {
        /// Field name as stored.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// A derived total does not fit in a decimal.
    #[error("overflow computing {0}")]
    Overflow(&'static str),
}
