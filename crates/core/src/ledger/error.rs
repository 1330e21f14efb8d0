//! Ledger error types.

use thiserror::Error;

use super::store::StoreError;

/// Errors surfaced by ledger persistence.
///
/// Only writes can fail from a caller's point of view; unreadable or corrupt
/// stored data is recovered from by starting empty.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The collection could not be serialized.
    #[error("failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),

    /// The store rejected the write. The in-memory ledger is unchanged.
    #[error("failed to persist ledger: {0}")]
    Store(#[from] StoreError),
}
