//! Ledger entry domain types.

use chrono::NaiveDate;
use folio_shared::types::{Currency, Money};
use serde::{Deserialize, Serialize};

use crate::invoice::{InvoiceRecord, WalkInRecord};

/// Kind of finalized bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// A room stay bill.
    #[serde(rename = "Hotel Stay")]
    HotelStay,
    /// A walk-in (non-stay) bill.
    #[serde(rename = "Walk-In")]
    WalkIn,
}

impl EntryKind {
    /// Label shown in lists and exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HotelStay => "Hotel Stay",
            Self::WalkIn => "Walk-In",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The finalized bill carried by an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum EntryPayload {
    /// A room stay bill.
    #[serde(rename = "Hotel Stay")]
    Stay(InvoiceRecord),
    /// A walk-in bill.
    #[serde(rename = "Walk-In")]
    WalkIn(WalkInRecord),
}

impl EntryPayload {
    /// Kind of bill.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Stay(_) => EntryKind::HotelStay,
            Self::WalkIn(_) => EntryKind::WalkIn,
        }
    }

    /// Billing currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        match self {
            Self::Stay(bill) => bill.input().currency,
            Self::WalkIn(bill) => bill.input().currency,
        }
    }

    /// Amount billed: amount received for a stay, subtotal for a walk-in.
    #[must_use]
    pub fn total(&self) -> Money {
        let amount = match self {
            Self::Stay(bill) => bill.totals().amount_received,
            Self::WalkIn(bill) => bill.totals().subtotal,
        };
        Money::new(amount, self.currency())
    }
}

/// A finalized bill in the ledger.
///
/// Identity, date and owner are taken from the bill when the entry is
/// created and cannot change afterwards. To edit a bill again, clone the
/// payload, edit the copy and append a new entry; the same receipt number
/// replaces the old entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    id: String,
    date: NaiveDate,
    owner_identity: String,
    #[serde(flatten)]
    payload: EntryPayload,
}

impl LedgerEntry {
    /// Finalizes a stay bill. The receiving staff member owns the entry.
    #[must_use]
    pub fn from_stay(record: &InvoiceRecord) -> Self {
        let record = crate::invoice::recalculate(record);
        let input = record.input();

        Self {
            id: input.receipt_id.to_string(),
            date: input.date,
            owner_identity: input.received_by.clone(),
            payload: EntryPayload::Stay(record),
        }
    }

    /// Finalizes a walk-in bill. The cashier owns the entry.
    #[must_use]
    pub fn from_walk_in(record: &WalkInRecord) -> Self {
        let record = crate::invoice::recalculate_walk_in(record);
        let input = record.input();

        Self {
            id: input.receipt_id.to_string(),
            date: input.date,
            owner_identity: input.cashier.clone(),
            payload: EntryPayload::WalkIn(record),
        }
    }

    /// Unique identity within the ledger (the receipt number).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind of bill.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.payload.kind()
    }

    /// Bill date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Staff member the entry is visible to.
    #[must_use]
    pub fn owner_identity(&self) -> &str {
        &self.owner_identity
    }

    /// The finalized bill.
    #[must_use]
    pub const fn payload(&self) -> &EntryPayload {
        &self.payload
    }
}

impl From<InvoiceRecord> for LedgerEntry {
    fn from(record: InvoiceRecord) -> Self {
        Self::from_stay(&record)
    }
}

impl From<WalkInRecord> for LedgerEntry {
    fn from(record: WalkInRecord) -> Self {
        Self::from_walk_in(&record)
    }
}
