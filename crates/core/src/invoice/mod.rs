//! Stay and walk-in bills with their derived totals.
//!
//! This module implements:
//! - Record types split into raw input and derived totals
//! - Pure recalculation of derived fields
//! - Typed field updates that always recalculate
//! - The nightly rate table

pub mod error;
pub mod rates;
pub mod totals;
pub mod types;
pub mod update;

#[cfg(test)]
mod totals_props;

pub use error::TotalsError;
pub use rates::{RateTable, StandardRates};
pub use totals::{
    compute_invoice_totals, compute_walk_in_totals, recalculate, recalculate_walk_in, sum_charges,
    try_compute_invoice_totals, try_compute_walk_in_totals,
};
pub use types::{
    BalanceStatus, ChargeItem, GuestDetails, InvoiceInput, InvoiceRecord, InvoiceTotals,
    PaymentDetails, PaymentMethod, ReceiptId, WalkInInput, WalkInRecord, WalkInTotals,
};
pub use update::{
    AmountField, ChargeEdit, InvoiceUpdate, TextField, WalkInTextField, WalkInUpdate,
};
