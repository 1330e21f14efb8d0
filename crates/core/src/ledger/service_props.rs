//! Property-based tests for the transaction ledger.

use std::collections::HashSet;

use chrono::NaiveDate;
use folio_shared::config::BillingConfig;
use proptest::prelude::*;

use super::entry::LedgerEntry;
use super::service::TransactionLedger;
use super::store::MemoryStore;
use crate::invoice::{InvoiceRecord, InvoiceUpdate, StandardRates, TextField};

const OWNERS: [&str; 3] = ["Ann", "Ben", "Chi"];

/// Strategy for a (receipt, owner, day offset) triple with a small id space
/// so that replacements happen often.
fn entry_params() -> impl Strategy<Value = (u8, usize, i64)> {
    (0u8..8, 0..OWNERS.len(), 0i64..60)
}

fn make_entry(receipt: u8, owner: usize, day: i64) -> LedgerEntry {
    let rates = StandardRates::new();
    let when = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.checked_add_signed(chrono::Duration::days(day)))
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap();

    let bill = InvoiceRecord::draft(&BillingConfig::default(), &rates, when).apply_all(
        [
            InvoiceUpdate::Text(TextField::ReceiptId, format!("RCPT-{receipt}")),
            InvoiceUpdate::Text(TextField::ReceivedBy, OWNERS[owner].to_string()),
        ],
        &rates,
    );
    LedgerEntry::from_stay(&bill)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Ids stay unique and each id holds the last entry appended for it.
    #[test]
    fn prop_ids_unique_and_latest_wins(params in prop::collection::vec(entry_params(), 0..30)) {
        let mut ledger = TransactionLedger::open(MemoryStore::new());
        let entries: Vec<LedgerEntry> = params
            .iter()
            .map(|&(receipt, owner, day)| make_entry(receipt, owner, day))
            .collect();

        for entry in &entries {
            ledger.append(entry.clone());
        }

        let all = ledger.all();
        let ids: HashSet<&str> = all.iter().map(LedgerEntry::id).collect();
        prop_assert_eq!(ids.len(), all.len());

        for entry in &all {
            let latest = entries.iter().rev().find(|e| e.id() == entry.id()).unwrap();
            prop_assert_eq!(entry, latest);
        }
    }

    /// Owner queries return only that owner's entries, newest first.
    #[test]
    fn prop_query_scoped_and_sorted(
        params in prop::collection::vec(entry_params(), 0..30),
        owner in 0..OWNERS.len(),
    ) {
        let mut ledger = TransactionLedger::open(MemoryStore::new());
        for &(receipt, who, day) in &params {
            ledger.append(make_entry(receipt, who, day));
        }

        let result = ledger.query_by_owner(OWNERS[owner]);
        prop_assert!(result.iter().all(|e| e.owner_identity() == OWNERS[owner]));
        prop_assert!(result.windows(2).all(|pair| pair[0].date() >= pair[1].date()));

        let expected = ledger
            .all()
            .iter()
            .filter(|e| e.owner_identity() == OWNERS[owner])
            .count();
        prop_assert_eq!(result.len(), expected);
    }

    /// Saving and reopening yields the same collection.
    #[test]
    fn prop_save_reopen_preserves_entries(params in prop::collection::vec(entry_params(), 0..20)) {
        let mut ledger = TransactionLedger::open(MemoryStore::new());
        for &(receipt, owner, day) in &params {
            ledger.append(make_entry(receipt, owner, day));
        }
        prop_assert!(ledger.save().is_ok());

        let reopened = TransactionLedger::open(ledger.store().clone());
        prop_assert_eq!(reopened.all(), ledger.all());
    }
}
