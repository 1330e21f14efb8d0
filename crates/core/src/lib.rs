//! Core business logic for Folio.
//!
//! This crate contains pure billing logic with no UI or rendering concerns.
//! Record types, totals, the ledger and its storage seam live here.
//!
//! # Modules
//!
//! - `words` - Amounts written out in English for receipts
//! - `invoice` - Stay and walk-in bills with derived totals
//! - `ledger` - Persisted collection of finalized bills
//! - `filter` - Inclusive date range filtering

pub mod filter;
pub mod invoice;
pub mod ledger;
pub mod words;
