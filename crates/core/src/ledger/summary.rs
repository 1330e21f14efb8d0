//! Per-currency ledger summaries and flat export rows.

use chrono::NaiveDate;
use folio_shared::types::Currency;
use rust_decimal::Decimal;
use serde::Serialize;

use super::entry::{EntryKind, EntryPayload, LedgerEntry};

/// Totals for the entries in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySummary {
    /// Currency of every amount in this summary.
    pub currency: Currency,
    /// Number of stay bills.
    pub stays: usize,
    /// Number of walk-in bills.
    pub walk_ins: usize,
    /// Stay amounts received plus walk-in amounts paid.
    pub total_received: Decimal,
    /// Sum of positive walk-in balances.
    pub outstanding: Decimal,
    /// Sum of overpaid walk-in balances, as a positive amount.
    pub credit: Decimal,
}

impl CurrencySummary {
    fn empty(currency: Currency) -> Self {
        Self {
            currency,
            stays: 0,
            walk_ins: 0,
            total_received: Decimal::ZERO,
            outstanding: Decimal::ZERO,
            credit: Decimal::ZERO,
        }
    }

    fn add(&mut self, payload: &EntryPayload) {
        match payload {
            EntryPayload::Stay(bill) => {
                self.stays += 1;
                self.total_received = self
                    .total_received
                    .saturating_add(bill.totals().amount_received);
            }
            EntryPayload::WalkIn(bill) => {
                self.walk_ins += 1;
                self.total_received = self
                    .total_received
                    .saturating_add(bill.input().amount_paid);
                let balance = bill.totals().balance;
                if balance.is_sign_positive() {
                    self.outstanding = self.outstanding.saturating_add(balance);
                } else {
                    self.credit = self.credit.saturating_sub(balance);
                }
            }
        }
    }

    /// Number of entries counted.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.stays + self.walk_ins
    }
}

/// Summary of a set of ledger entries, one line per currency in use.
///
/// Amounts in different currencies are never added together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// One summary per currency that has entries, in [`Currency::ALL`] order.
    pub currencies: Vec<CurrencySummary>,
}

impl LedgerSummary {
    /// Summarizes the given entries.
    #[must_use]
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let mut currencies: Vec<CurrencySummary> =
            Currency::ALL.into_iter().map(CurrencySummary::empty).collect();

        for entry in entries {
            let currency = entry.payload().currency();
            if let Some(summary) = currencies.iter_mut().find(|s| s.currency == currency) {
                summary.add(entry.payload());
            }
        }

        currencies.retain(|summary| summary.entries() > 0);
        Self { currencies }
    }

    /// Summary for one currency, if any entries use it.
    #[must_use]
    pub fn for_currency(&self, currency: Currency) -> Option<&CurrencySummary> {
        self.currencies.iter().find(|s| s.currency == currency)
    }
}

/// One ledger entry flattened to plain data for CSV or print output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    /// Receipt id.
    pub id: String,
    /// Kind of bill.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Bill date.
    pub date: NaiveDate,
    /// Staff member who owns the entry.
    pub owner: String,
    /// Guest or customer name.
    pub party: String,
    /// Billing currency.
    pub currency: Currency,
    /// Amount billed.
    pub total: Decimal,
    /// Amount paid.
    pub paid: Decimal,
    /// Amount still owed; negative for credit.
    pub balance: Decimal,
}

impl ExportRow {
    /// Flattens an entry.
    ///
    /// Stay bills are paid in full on issue, so their balance is zero.
    #[must_use]
    pub fn from_entry(entry: &LedgerEntry) -> Self {
        let total = entry.payload().total();
        let (party, paid, balance) = match entry.payload() {
            EntryPayload::Stay(bill) => {
                (bill.input().guest.name.clone(), total.amount, Decimal::ZERO)
            }
            EntryPayload::WalkIn(bill) => (
                bill.input().customer_name.clone(),
                bill.input().amount_paid,
                bill.totals().balance,
            ),
        };

        Self {
            id: entry.id().to_string(),
            kind: entry.kind(),
            date: entry.date(),
            owner: entry.owner_identity().to_string(),
            party,
            currency: total.currency,
            total: total.amount,
            paid,
            balance,
        }
    }
}

impl From<&LedgerEntry> for ExportRow {
    fn from(entry: &LedgerEntry) -> Self {
        Self::from_entry(entry)
    }
}
