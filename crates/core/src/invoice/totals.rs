//! Pure recalculation of derived invoice fields.
//!
//! Every way of building or editing a record funnels through the functions in
//! this module, so derived fields are always a function of the raw ones.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use folio_shared::config::BillingConfig;
use folio_shared::format::{
    MAX_AMOUNT, MAX_PERCENTAGE, clamp_amount, clamp_percentage, round_money,
};
use folio_shared::types::SubtotalPolicy;
use tracing::warn;

use super::error::TotalsError;
use super::rates::RateTable;
use super::types::{
    ChargeItem, GuestDetails, InvoiceInput, InvoiceRecord, InvoiceTotals, PaymentDetails,
    PaymentMethod, ReceiptId, WalkInInput, WalkInRecord, WalkInTotals,
};
use crate::words::{INVALID_AMOUNT, amount_in_words};

/// Recomputes every derived field of a stay bill from its raw fields.
///
/// Idempotent: `recalculate(&recalculate(r)) == recalculate(r)`.
#[must_use]
pub fn recalculate(record: &InvoiceRecord) -> InvoiceRecord {
    InvoiceRecord::new(record.input.clone())
}

/// Recomputes every derived field of a walk-in bill from its raw fields.
#[must_use]
pub fn recalculate_walk_in(record: &WalkInRecord) -> WalkInRecord {
    WalkInRecord::new(record.input.clone())
}

/// Sum of charge amounts.
pub fn sum_charges(charges: &[ChargeItem]) -> Result<Decimal, TotalsError> {
    charges.iter().try_fold(Decimal::ZERO, |total, charge| {
        total
            .checked_add(charge.amount)
            .ok_or(TotalsError::Overflow("additional charges"))
    })
}

/// Derives stay totals with checked arithmetic.
///
/// `subtotal = nights × rate + charges − discount`, floored at zero under
/// [`SubtotalPolicy::ClampToZero`]. Tax is rounded to two places half away
/// from zero; `amount_received = subtotal + tax`.
pub fn try_compute_invoice_totals(input: &InvoiceInput) -> Result<InvoiceTotals, TotalsError> {
    let room_charge = Decimal::from(input.nights)
        .checked_mul(input.rate_per_night)
        .ok_or(TotalsError::Overflow("room charge"))?;
    let additional_charges = sum_charges(&input.charges)?;

    let mut subtotal = room_charge
        .checked_add(additional_charges)
        .and_then(|gross| gross.checked_sub(input.discount))
        .ok_or(TotalsError::Overflow("subtotal"))?;
    if input.subtotal_policy == SubtotalPolicy::ClampToZero && subtotal < Decimal::ZERO {
        subtotal = Decimal::ZERO;
    }

    let tax_amount = subtotal
        .checked_mul(input.tax_percentage)
        .and_then(|tax| tax.checked_div(Decimal::ONE_HUNDRED))
        .map(round_money)
        .ok_or(TotalsError::Overflow("tax amount"))?;
    let amount_received = subtotal
        .checked_add(tax_amount)
        .ok_or(TotalsError::Overflow("amount received"))?;

    Ok(InvoiceTotals {
        room_charge,
        additional_charges,
        subtotal,
        tax_amount,
        amount_received,
        amount_in_words: amount_in_words(amount_received, input.currency),
    })
}

/// Derives stay totals, never failing.
///
/// Raw fields that overflow give all-zero totals worded as
/// [`INVALID_AMOUNT`]. Records built through [`InvoiceRecord::new`] are
/// clamped first and never reach that case.
#[must_use]
pub fn compute_invoice_totals(input: &InvoiceInput) -> InvoiceTotals {
    try_compute_invoice_totals(input).unwrap_or_else(|err| {
        warn!(receipt_id = %input.receipt_id, error = %err, "stay totals out of range");
        InvoiceTotals {
            room_charge: Decimal::ZERO,
            additional_charges: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            amount_received: Decimal::ZERO,
            amount_in_words: INVALID_AMOUNT.to_string(),
        }
    })
}

/// Derives walk-in totals with checked arithmetic. The balance is signed:
/// positive is still owed.
pub fn try_compute_walk_in_totals(input: &WalkInInput) -> Result<WalkInTotals, TotalsError> {
    let subtotal = sum_charges(&input.charges)?;
    let balance = subtotal
        .checked_sub(input.amount_paid)
        .ok_or(TotalsError::Overflow("balance"))?;

    Ok(WalkInTotals {
        subtotal,
        balance,
        amount_in_words: amount_in_words(subtotal, input.currency),
    })
}

/// Derives walk-in totals, never failing. Overflow gives zero totals worded
/// as [`INVALID_AMOUNT`].
#[must_use]
pub fn compute_walk_in_totals(input: &WalkInInput) -> WalkInTotals {
    try_compute_walk_in_totals(input).unwrap_or_else(|err| {
        warn!(receipt_id = %input.receipt_id, error = %err, "walk-in totals out of range");
        WalkInTotals {
            subtotal: Decimal::ZERO,
            balance: Decimal::ZERO,
            amount_in_words: INVALID_AMOUNT.to_string(),
        }
    })
}

impl InvoiceInput {
    /// Coerces raw fields into range: at least one night, amounts clamped
    /// to `0..=MAX_AMOUNT` and tax to `0..=100`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.nights = self.nights.max(1);
        self.rate_per_night = clamp_amount(self.rate_per_night);
        self.discount = clamp_amount(self.discount);
        self.tax_percentage = clamp_percentage(self.tax_percentage);
        for charge in &mut self.charges {
            charge.amount = clamp_amount(charge.amount);
        }
        self
    }

    fn check_upper_bounds(&self) -> Result<(), TotalsError> {
        check_amount("ratePerNight", self.rate_per_night)?;
        check_amount("discount", self.discount)?;
        check_charges(&self.charges)?;
        if self.tax_percentage > MAX_PERCENTAGE {
            return Err(TotalsError::OutOfRange {
                field: "taxPercentage",
                value: self.tax_percentage,
            });
        }
        Ok(())
    }
}

impl WalkInInput {
    /// Coerces raw fields into range: amounts clamped to `0..=MAX_AMOUNT`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.amount_paid = clamp_amount(self.amount_paid);
        for charge in &mut self.charges {
            charge.amount = clamp_amount(charge.amount);
        }
        self
    }

    fn check_upper_bounds(&self) -> Result<(), TotalsError> {
        check_amount("amountPaid", self.amount_paid)?;
        check_charges(&self.charges)
    }
}

fn check_amount(field: &'static str, value: Decimal) -> Result<(), TotalsError> {
    if value > MAX_AMOUNT {
        return Err(TotalsError::OutOfRange { field, value });
    }
    Ok(())
}

fn check_charges(charges: &[ChargeItem]) -> Result<(), TotalsError> {
    charges
        .iter()
        .try_for_each(|charge| check_amount("charges.amount", charge.amount))
}

impl InvoiceRecord {
    /// Builds a record from raw fields, deriving the totals.
    ///
    /// Out-of-range raw fields are coerced first (see
    /// [`InvoiceInput::normalized`]).
    #[must_use]
    pub fn new(input: InvoiceInput) -> Self {
        let input = input.normalized();
        let totals = compute_invoice_totals(&input);
        Self { input, totals }
    }

    /// A fresh bill: one night, configured room type, currency and tax, and
    /// the rate card's price for that room.
    #[must_use]
    pub fn draft<R>(config: &BillingConfig, rates: &R, now: NaiveDateTime) -> Self
    where
        R: RateTable + ?Sized,
    {
        let room_type = config.default_room_type;
        let currency = config.default_currency;

        Self::new(InvoiceInput {
            receipt_id: ReceiptId::generate(ReceiptId::STAY_PREFIX, now),
            date: now.date(),
            guest: GuestDetails::default(),
            room_type,
            room_number: String::new(),
            nights: 1,
            rate_per_night: rates.rate_for(room_type, currency),
            charges: Vec::new(),
            discount: Decimal::ZERO,
            tax_percentage: config.default_tax_percentage,
            currency,
            payment: PaymentDetails::default(),
            received_by: String::new(),
            subtotal_policy: config.subtotal_policy,
        })
    }
}

/// Used when reading stored bills: values no bill could hold are rejected
/// rather than capped, and negatives or zero nights are coerced.
impl TryFrom<InvoiceInput> for InvoiceRecord {
    type Error = TotalsError;

    fn try_from(input: InvoiceInput) -> Result<Self, Self::Error> {
        input.check_upper_bounds()?;
        let input = input.normalized();
        let totals = try_compute_invoice_totals(&input)?;
        Ok(Self { input, totals })
    }
}

impl WalkInRecord {
    /// Builds a record from raw fields, deriving the totals.
    ///
    /// Negative amounts become zero; amounts above `MAX_AMOUNT` are capped.
    #[must_use]
    pub fn new(input: WalkInInput) -> Self {
        let input = input.normalized();
        let totals = compute_walk_in_totals(&input);
        Self { input, totals }
    }

    /// A fresh walk-in bill with no charges in the configured currency.
    #[must_use]
    pub fn draft(config: &BillingConfig, now: NaiveDateTime) -> Self {
        Self::new(WalkInInput {
            receipt_id: ReceiptId::generate(ReceiptId::WALK_IN_PREFIX, now),
            date: now.date(),
            customer_name: String::new(),
            cashier: String::new(),
            currency: config.default_currency,
            payment_method: PaymentMethod::default(),
            charges: Vec::new(),
            amount_paid: Decimal::ZERO,
        })
    }
}

impl TryFrom<WalkInInput> for WalkInRecord {
    type Error = TotalsError;

    fn try_from(input: WalkInInput) -> Result<Self, Self::Error> {
        input.check_upper_bounds()?;
        let input = input.normalized();
        let totals = try_compute_walk_in_totals(&input)?;
        Ok(Self { input, totals })
    }
}
