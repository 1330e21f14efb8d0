//! Invoice and walk-in record types.
//!
//! Each record is split into raw input (what staff type) and derived totals
//! (what the system computes). The derived half of a record can only be built
//! by recalculation, so the two can never drift apart.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::format::clamp_amount;
use folio_shared::types::{ChargeItemId, Currency, RoomType, SubtotalPolicy};

/// Receipt number printed on a bill and used as its ledger identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    /// Prefix for hotel stay receipts.
    pub const STAY_PREFIX: &'static str = "RCPT";
    /// Prefix for walk-in receipts.
    pub const WALK_IN_PREFIX: &'static str = "WLK";

    /// Generates a receipt number from a timestamp, e.g. `RCPT-20240510-143005`.
    #[must_use]
    pub fn generate(prefix: &str, now: NaiveDateTime) -> Self {
        Self(format!("{prefix}-{}", now.format("%Y%m%d-%H%M%S")))
    }

    /// Returns the receipt number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReceiptId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single extra charge (laundry, minibar, restaurant) or walk-in service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeItem {
    /// Unique identifier within the owning record.
    pub id: ChargeItemId,
    /// What the charge is for.
    pub description: String,
    /// Non-negative amount in the record's currency.
    pub amount: Decimal,
}

impl ChargeItem {
    /// Creates a charge with a fresh id. The amount is clamped to
    /// `0..=MAX_AMOUNT`.
    #[must_use]
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: ChargeItemId::new(),
            description: description.into(),
            amount: clamp_amount(amount),
        }
    }
}

/// How a bill was settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the front desk.
    #[default]
    Cash,
    /// Debit or credit card (POS).
    Card,
    /// Bank transfer.
    Transfer,
}

/// Payment metadata attached to a stay bill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// How the guest paid.
    pub method: PaymentMethod,
    /// POS slip or transfer reference, if any.
    #[serde(default)]
    pub reference: String,
}

/// Guest identity fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    /// Full name.
    pub name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Home address.
    #[serde(default)]
    pub address: String,
}

/// Raw, editable fields of a hotel stay bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceInput {
    /// Receipt number.
    pub receipt_id: ReceiptId,
    /// Bill date.
    pub date: NaiveDate,
    /// Guest identity.
    pub guest: GuestDetails,
    /// Room classification.
    pub room_type: RoomType,
    /// Room number.
    #[serde(default)]
    pub room_number: String,
    /// Nights stayed (at least one).
    pub nights: u32,
    /// Rate per night.
    pub rate_per_night: Decimal,
    /// Additional charges.
    #[serde(default)]
    pub charges: Vec<ChargeItem>,
    /// Discount taken off room plus additional charges.
    #[serde(default)]
    pub discount: Decimal,
    /// Tax percentage applied to the subtotal (7.5 means 7.5%).
    #[serde(default)]
    pub tax_percentage: Decimal,
    /// Billing currency.
    pub currency: Currency,
    /// Payment metadata.
    #[serde(default)]
    pub payment: PaymentDetails,
    /// Staff member who received the payment; owns the ledger entry.
    pub received_by: String,
    /// Policy for discounts larger than the charges.
    #[serde(default)]
    pub subtotal_policy: SubtotalPolicy,
}

/// Derived monetary fields of a stay bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// `nights × rate_per_night`.
    pub room_charge: Decimal,
    /// Sum of the additional charges.
    pub additional_charges: Decimal,
    /// Room plus additional charges less discount.
    pub subtotal: Decimal,
    /// Tax on the subtotal, rounded to two places.
    pub tax_amount: Decimal,
    /// Subtotal plus tax.
    pub amount_received: Decimal,
    /// `amount_received` in words.
    pub amount_in_words: String,
}

/// A hotel stay bill: raw input plus totals derived from it.
///
/// Stored copies are deserialized from their raw fields only; any derived
/// values in the payload are recomputed. Amounts beyond what a bill can hold
/// fail deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceInput")]
pub struct InvoiceRecord {
    #[serde(flatten)]
    pub(crate) input: InvoiceInput,
    #[serde(flatten)]
    pub(crate) totals: InvoiceTotals,
}

impl InvoiceRecord {
    /// Raw fields.
    #[must_use]
    pub fn input(&self) -> &InvoiceInput {
        &self.input
    }

    /// Derived totals.
    #[must_use]
    pub fn totals(&self) -> &InvoiceTotals {
        &self.totals
    }

    /// Gives back the raw fields, dropping the derived ones.
    #[must_use]
    pub fn into_input(self) -> InvoiceInput {
        self.input
    }
}

/// Raw, editable fields of a walk-in (non-stay) bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkInInput {
    /// Receipt number.
    pub receipt_id: ReceiptId,
    /// Bill date.
    pub date: NaiveDate,
    /// Customer name.
    #[serde(default)]
    pub customer_name: String,
    /// Cashier on duty; owns the ledger entry.
    pub cashier: String,
    /// Billing currency.
    pub currency: Currency,
    /// How the customer paid.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Services rendered.
    #[serde(default)]
    pub charges: Vec<ChargeItem>,
    /// Amount handed over by the customer.
    #[serde(default)]
    pub amount_paid: Decimal,
}

/// Whether a walk-in bill is settled, short, or overpaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    /// Paid in full.
    Settled,
    /// Customer still owes the balance.
    Outstanding,
    /// Customer paid more than the subtotal.
    Credit,
}

/// Derived fields of a walk-in bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkInTotals {
    /// Sum of the service charges.
    pub subtotal: Decimal,
    /// `subtotal − amount_paid`: positive is owed, negative is credit.
    pub balance: Decimal,
    /// `subtotal` in words.
    pub amount_in_words: String,
}

impl WalkInTotals {
    /// Classifies the signed balance.
    #[must_use]
    pub fn status(&self) -> BalanceStatus {
        if self.balance.is_zero() {
            BalanceStatus::Settled
        } else if self.balance.is_sign_positive() {
            BalanceStatus::Outstanding
        } else {
            BalanceStatus::Credit
        }
    }
}

/// A walk-in bill: raw input plus totals derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WalkInInput")]
pub struct WalkInRecord {
    #[serde(flatten)]
    pub(crate) input: WalkInInput,
    #[serde(flatten)]
    pub(crate) totals: WalkInTotals,
}

impl WalkInRecord {
    /// Raw fields.
    #[must_use]
    pub fn input(&self) -> &WalkInInput {
        &self.input
    }

    /// Derived totals.
    #[must_use]
    pub fn totals(&self) -> &WalkInTotals {
        &self.totals
    }

    /// Gives back the raw fields, dropping the derived ones.
    #[must_use]
    pub fn into_input(self) -> WalkInInput {
        self.input
    }
}
