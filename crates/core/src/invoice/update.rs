//! Typed field updates for invoice and walk-in records.
//!
//! Edits are values, not setters: the UI describes what changed and the
//! record returns a recalculated copy. There is no path that mutates a raw
//! field without recomputing the totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use folio_shared::format::{clamp_amount, clamp_percentage, parse_amount, parse_nights};
use folio_shared::types::{ChargeItemId, Currency, RoomType, SubtotalPolicy};

use super::rates::RateTable;
use super::types::{ChargeItem, InvoiceRecord, PaymentMethod, ReceiptId, WalkInRecord};

/// Free-text fields of a stay bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// Receipt number.
    ReceiptId,
    /// Guest full name.
    GuestName,
    /// Guest phone.
    GuestPhone,
    /// Guest email.
    GuestEmail,
    /// Guest address.
    GuestAddress,
    /// Room number.
    RoomNumber,
    /// Payment reference.
    PaymentReference,
    /// Receiving staff member.
    ReceivedBy,
}

/// Non-negative decimal fields of a stay bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    /// Rate per night.
    RatePerNight,
    /// Discount.
    Discount,
    /// Tax percentage.
    TaxPercentage,
}

/// Changes to the list of charge lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeEdit {
    /// Appends a new charge.
    Add {
        /// What the charge is for.
        description: String,
        /// Amount, clamped to `0..=MAX_AMOUNT`.
        amount: Decimal,
    },
    /// Changes an existing charge. Unknown ids are ignored.
    Update {
        /// Charge to change.
        id: ChargeItemId,
        /// New description, if changed.
        description: Option<String>,
        /// New amount, if changed.
        amount: Option<Decimal>,
    },
    /// Removes a charge. Unknown ids are ignored.
    Remove(ChargeItemId),
}

impl ChargeEdit {
    /// Adds a charge whose amount was typed as text.
    #[must_use]
    pub fn add_from_text(description: impl Into<String>, amount: &str) -> Self {
        Self::Add {
            description: description.into(),
            amount: parse_amount(amount),
        }
    }

    fn apply(self, charges: &mut Vec<ChargeItem>) {
        match self {
            Self::Add {
                description,
                amount,
            } => charges.push(ChargeItem::new(description, amount)),
            Self::Update {
                id,
                description,
                amount,
            } => match charges.iter_mut().find(|charge| charge.id == id) {
                Some(charge) => {
                    if let Some(description) = description {
                        charge.description = description;
                    }
                    if let Some(amount) = amount {
                        charge.amount = clamp_amount(amount);
                    }
                }
                None => debug!(charge_id = %id, "ignoring update for unknown charge"),
            },
            Self::Remove(id) => charges.retain(|charge| charge.id != id),
        }
    }
}

/// One edit to a stay bill, grouped by field category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceUpdate {
    /// Sets a text field.
    Text(TextField, String),
    /// Sets a decimal field, clamped to `0..=MAX_AMOUNT` (tax to `0..=100`).
    Amount(AmountField, Decimal),
    /// Sets the number of nights; zero becomes one.
    Nights(u32),
    /// Sets the bill date.
    Date(NaiveDate),
    /// Changes the room type and, unless the rate is set in the same batch,
    /// the nightly rate.
    RoomType(RoomType),
    /// Changes the currency and, unless the rate is set in the same batch,
    /// the nightly rate.
    Currency(Currency),
    /// Sets the payment method.
    PaymentMethod(PaymentMethod),
    /// Sets the negative-subtotal policy.
    SubtotalPolicy(SubtotalPolicy),
    /// Edits the charge lines.
    Charge(ChargeEdit),
}

impl InvoiceUpdate {
    /// Sets a decimal field from typed text; unparseable text becomes zero.
    #[must_use]
    pub fn amount_from_text(field: AmountField, text: &str) -> Self {
        Self::Amount(field, parse_amount(text))
    }

    /// Sets nights from typed text; unparseable or zero becomes one.
    #[must_use]
    pub fn nights_from_text(text: &str) -> Self {
        Self::Nights(parse_nights(text))
    }
}

impl InvoiceRecord {
    /// Applies a single update and returns the recalculated record.
    #[must_use]
    pub fn apply<R>(&self, update: InvoiceUpdate, rates: &R) -> Self
    where
        R: RateTable + ?Sized,
    {
        self.apply_all([update], rates)
    }

    /// Applies a batch of updates and returns the recalculated record.
    ///
    /// If the batch changes room type or currency the nightly rate is taken
    /// from `rates`, unless the batch also sets the rate explicitly.
    #[must_use]
    pub fn apply_all<R, I>(&self, updates: I, rates: &R) -> Self
    where
        R: RateTable + ?Sized,
        I: IntoIterator<Item = InvoiceUpdate>,
    {
        let mut input = self.input.clone();
        let mut rate_set = false;
        let mut rate_basis_changed = false;

        for update in updates {
            match update {
                InvoiceUpdate::Text(field, value) => {
                    let target = match field {
                        TextField::ReceiptId => {
                            input.receipt_id = ReceiptId(value);
                            continue;
                        }
                        TextField::GuestName => &mut input.guest.name,
                        TextField::GuestPhone => &mut input.guest.phone,
                        TextField::GuestEmail => &mut input.guest.email,
                        TextField::GuestAddress => &mut input.guest.address,
                        TextField::RoomNumber => &mut input.room_number,
                        TextField::PaymentReference => &mut input.payment.reference,
                        TextField::ReceivedBy => &mut input.received_by,
                    };
                    *target = value;
                }
                InvoiceUpdate::Amount(field, value) => {
                    match field {
                        AmountField::RatePerNight => {
                            input.rate_per_night = clamp_amount(value);
                            rate_set = true;
                        }
                        AmountField::Discount => input.discount = clamp_amount(value),
                        AmountField::TaxPercentage => {
                            input.tax_percentage = clamp_percentage(value);
                        }
                    }
                }
                InvoiceUpdate::Nights(nights) => input.nights = nights.max(1),
                InvoiceUpdate::Date(date) => input.date = date,
                InvoiceUpdate::RoomType(room_type) => {
                    rate_basis_changed |= input.room_type != room_type;
                    input.room_type = room_type;
                }
                InvoiceUpdate::Currency(currency) => {
                    rate_basis_changed |= input.currency != currency;
                    input.currency = currency;
                }
                InvoiceUpdate::PaymentMethod(method) => input.payment.method = method,
                InvoiceUpdate::SubtotalPolicy(policy) => input.subtotal_policy = policy,
                InvoiceUpdate::Charge(edit) => edit.apply(&mut input.charges),
            }
        }

        if rate_basis_changed && !rate_set {
            input.rate_per_night = rates.rate_for(input.room_type, input.currency);
            debug!(
                room_type = %input.room_type,
                currency = %input.currency,
                rate = %input.rate_per_night,
                "nightly rate re-derived from rate table"
            );
        }

        Self::new(input)
    }
}

/// Free-text fields of a walk-in bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkInTextField {
    /// Receipt number.
    ReceiptId,
    /// Customer name.
    CustomerName,
    /// Cashier on duty.
    Cashier,
}

/// One edit to a walk-in bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkInUpdate {
    /// Sets a text field.
    Text(WalkInTextField, String),
    /// Sets the bill date.
    Date(NaiveDate),
    /// Sets the currency.
    Currency(Currency),
    /// Sets the payment method.
    PaymentMethod(PaymentMethod),
    /// Sets the amount paid, clamped to `0..=MAX_AMOUNT`.
    AmountPaid(Decimal),
    /// Edits the service lines.
    Charge(ChargeEdit),
}

impl WalkInUpdate {
    /// Sets the amount paid from typed text; unparseable text becomes zero.
    #[must_use]
    pub fn amount_paid_from_text(text: &str) -> Self {
        Self::AmountPaid(parse_amount(text))
    }
}

impl WalkInRecord {
    /// Applies a single update and returns the recalculated record.
    #[must_use]
    pub fn apply(&self, update: WalkInUpdate) -> Self {
        self.apply_all([update])
    }

    /// Applies a batch of updates and returns the recalculated record.
    #[must_use]
    pub fn apply_all<I>(&self, updates: I) -> Self
    where
        I: IntoIterator<Item = WalkInUpdate>,
    {
        let mut input = self.input.clone();

        for update in updates {
            match update {
                WalkInUpdate::Text(WalkInTextField::ReceiptId, value) => {
                    input.receipt_id = ReceiptId(value);
                }
                WalkInUpdate::Text(WalkInTextField::CustomerName, value) => {
                    input.customer_name = value;
                }
                WalkInUpdate::Text(WalkInTextField::Cashier, value) => input.cashier = value,
                WalkInUpdate::Date(date) => input.date = date,
                WalkInUpdate::Currency(currency) => input.currency = currency,
                WalkInUpdate::PaymentMethod(method) => input.payment_method = method,
                WalkInUpdate::AmountPaid(amount) => input.amount_paid = clamp_amount(amount),
                WalkInUpdate::Charge(edit) => edit.apply(&mut input.charges),
            }
        }

        Self::new(input)
    }
}
