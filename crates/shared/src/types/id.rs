//! Identifier for charge lines.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one charge line so it can be edited or removed after others
/// are added. Time-ordered (UUID v7), so ids sort in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeItemId(Uuid);

impl ChargeItemId {
    /// A fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ChargeItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChargeItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
