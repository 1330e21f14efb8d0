//! Transaction ledger of finalized bills.
//!
//! This module implements:
//! - Ledger entries wrapping stay and walk-in bills
//! - The key-value storage seam with memory and file backends
//! - Replace-on-append persistence with owner-scoped queries
//! - Per-currency summaries and export rows

pub mod entry;
pub mod error;
pub mod service;
pub mod store;
pub mod summary;

#[cfg(test)]
mod service_props;

pub use entry::{EntryKind, EntryPayload, LedgerEntry};
pub use error::LedgerError;
pub use service::{DEFAULT_STORAGE_KEY, TransactionLedger};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use summary::{CurrencySummary, ExportRow, LedgerSummary};
