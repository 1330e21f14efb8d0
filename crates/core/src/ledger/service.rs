//! Transaction ledger: replace-on-append storage of finalized bills with
//! owner-scoped, newest-first queries.

use tracing::{debug, info, warn};

use super::entry::LedgerEntry;
use super::error::LedgerError;
use super::store::KeyValueStore;
use crate::filter::DateRange;

/// Key the ledger is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "hotel_transactions";

/// The collection of finalized bills, persisted through a [`KeyValueStore`].
///
/// The ledger is the single writer of its key. Entry ids are unique at all
/// times: appending an entry whose id is already present replaces the old
/// one. Queries hand out clones; the collection itself is never exposed
/// mutably.
#[derive(Debug)]
pub struct TransactionLedger<S> {
    store: S,
    key: String,
    entries: Vec<LedgerEntry>,
}

impl<S: KeyValueStore> TransactionLedger<S> {
    /// Opens the ledger stored under [`DEFAULT_STORAGE_KEY`].
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Opens the ledger stored under `key`.
    ///
    /// Never fails: a missing, unreadable or corrupt payload yields an empty
    /// ledger, and a corrupt payload is removed from the store.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let mut ledger = Self {
            store,
            key: key.into(),
            entries: Vec::new(),
        };
        ledger.reload();
        ledger
    }

    /// Replaces the in-memory collection with what the store holds.
    ///
    /// All or nothing: on any read or decode failure the ledger is empty.
    pub fn reload(&mut self) {
        self.entries = match self.store.read(&self.key) {
            Ok(None) => Vec::new(),
            Ok(Some(raw)) => match decode(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(key = %self.key, error = %err, "discarding corrupt ledger payload");
                    if let Err(err) = self.store.remove(&self.key) {
                        warn!(key = %self.key, error = %err, "failed to remove corrupt ledger payload");
                    }
                    Vec::new()
                }
            },
            Err(err) => {
                warn!(key = %self.key, error = %err, "ledger store unreadable, starting empty");
                Vec::new()
            }
        };

        debug!(key = %self.key, entries = self.entries.len(), "ledger loaded");
    }

    /// Adds an entry in memory, replacing any entry with the same id.
    pub fn append(&mut self, entry: LedgerEntry) {
        merge(&mut self.entries, entry);
    }

    /// Writes the whole collection to the store.
    ///
    /// On failure the in-memory collection is untouched and the call can be
    /// retried.
    pub fn save(&mut self) -> Result<(), LedgerError> {
        let payload = serde_json::to_string(&self.entries)?;
        self.store.write(&self.key, &payload)?;

        info!(key = %self.key, entries = self.entries.len(), "ledger saved");
        Ok(())
    }

    /// Appends an entry and saves.
    pub fn record(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
        let id = entry.id().to_string();
        let total = entry.payload().total();
        self.append(entry);

        match self.save() {
            Ok(()) => {
                info!(entry_id = %id, %total, "entry recorded");
                Ok(())
            }
            Err(err) => {
                warn!(entry_id = %id, error = %err, "entry kept in memory but not persisted");
                Err(err)
            }
        }
    }
}

impl<S> TransactionLedger<S> {
    /// Entries owned by `owner` (exact, case-sensitive), newest first.
    ///
    /// Entries on the same day keep their insertion order.
    #[must_use]
    pub fn query_by_owner(&self, owner: &str) -> Vec<LedgerEntry> {
        self.query_by_owner_in_range(owner, &DateRange::unbounded())
    }

    /// Entries owned by `owner` dated within `range`, newest first.
    #[must_use]
    pub fn query_by_owner_in_range(&self, owner: &str, range: &DateRange) -> Vec<LedgerEntry> {
        let mut matches: Vec<LedgerEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.owner_identity() == owner && range.contains(entry.date()))
            .cloned()
            .collect();

        // stable: ties stay in insertion order
        matches.sort_by(|a, b| b.date().cmp(&a.date()));
        matches
    }

    /// Every entry in insertion order, for administrative export.
    #[must_use]
    pub fn all(&self) -> Vec<LedgerEntry> {
        self.entries.clone()
    }

    /// The entry with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<LedgerEntry> {
        self.entries.iter().find(|entry| entry.id() == id).cloned()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the ledger holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn merge(entries: &mut Vec<LedgerEntry>, entry: LedgerEntry) {
    entries.retain(|existing| existing.id() != entry.id());
    entries.push(entry);
}

/// Decodes a stored payload, collapsing duplicate ids the same way
/// [`TransactionLedger::append`] would.
fn decode(raw: &str) -> Result<Vec<LedgerEntry>, serde_json::Error> {
    let stored: Vec<LedgerEntry> = serde_json::from_str(raw)?;
    let mut entries = Vec::with_capacity(stored.len());
    for entry in stored {
        merge(&mut entries, entry);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_shared::config::BillingConfig;
    use rust_decimal_macros::dec;

    use crate::invoice::{
        AmountField, ChargeEdit, InvoiceRecord, InvoiceUpdate, StandardRates, TextField,
        WalkInRecord, WalkInTextField, WalkInUpdate,
    };
    use crate::ledger::entry::EntryPayload;
    use crate::ledger::store::{JsonFileStore, MemoryStore, StoreError};

    fn at(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn stay(receipt: &str, owner: &str, date: (i32, u32, u32)) -> InvoiceRecord {
        let rates = StandardRates::new();
        InvoiceRecord::draft(&BillingConfig::default(), &rates, at(date.0, date.1, date.2))
            .apply_all(
                [
                    InvoiceUpdate::Text(TextField::ReceiptId, receipt.into()),
                    InvoiceUpdate::Text(TextField::ReceivedBy, owner.into()),
                ],
                &rates,
            )
    }

    fn walk_in(receipt: &str, owner: &str, date: (i32, u32, u32)) -> WalkInRecord {
        WalkInRecord::draft(&BillingConfig::default(), at(date.0, date.1, date.2)).apply_all([
            WalkInUpdate::Text(WalkInTextField::ReceiptId, receipt.into()),
            WalkInUpdate::Text(WalkInTextField::Cashier, owner.into()),
            WalkInUpdate::Charge(ChargeEdit::add_from_text("Gym", "2000")),
        ])
    }

    fn ids(entries: &[LedgerEntry]) -> Vec<&str> {
        entries.iter().map(LedgerEntry::id).collect()
    }

    /// Store whose writes always fail, for exercising the failure path.
    #[derive(Debug, Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.read(key)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }
    }

    #[test]
    fn test_append_same_id_replaces() {
        let rates = StandardRates::new();
        let mut ledger = TransactionLedger::open(MemoryStore::new());

        let first = stay("RCPT-1", "Ann", (2024, 1, 1));
        let revised = first.apply(InvoiceUpdate::Amount(AmountField::Discount, dec!(1000)), &rates);

        ledger.append(LedgerEntry::from_stay(&first));
        ledger.append(LedgerEntry::from_stay(&revised));

        let entries = ledger.query_by_owner("Ann");
        assert_eq!(entries.len(), 1);
        match entries[0].payload() {
            EntryPayload::Stay(bill) => {
                assert_eq!(bill.input().discount, dec!(1000));
                assert_eq!(bill.totals().subtotal, dec!(24000));
            }
            EntryPayload::WalkIn(_) => panic!("expected stay payload"),
        }
    }

    #[test]
    fn test_query_orders_newest_first() {
        let mut ledger = TransactionLedger::open(MemoryStore::new());
        ledger.append(LedgerEntry::from_stay(&stay("A", "Ann", (2024, 1, 1))));
        ledger.append(LedgerEntry::from_stay(&stay("B", "Ann", (2024, 3, 1))));
        ledger.append(LedgerEntry::from_stay(&stay("C", "Ann", (2024, 2, 1))));

        let dates: Vec<_> = ledger
            .query_by_owner("Ann")
            .iter()
            .map(|entry| entry.date().to_string())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[test]
    fn test_same_day_keeps_insertion_order() {
        let mut ledger = TransactionLedger::open(MemoryStore::new());
        ledger.append(LedgerEntry::from_stay(&stay("FIRST", "Ann", (2024, 5, 1))));
        ledger.append(LedgerEntry::from_walk_in(&walk_in("SECOND", "Ann", (2024, 5, 1))));
        ledger.append(LedgerEntry::from_stay(&stay("THIRD", "Ann", (2024, 5, 1))));

        assert_eq!(ids(&ledger.query_by_owner("Ann")), vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_replaced_entry_moves_to_newest_insertion_position() {
        let mut ledger = TransactionLedger::open(MemoryStore::new());
        ledger.append(LedgerEntry::from_stay(&stay("A", "Ann", (2024, 5, 1))));
        ledger.append(LedgerEntry::from_stay(&stay("B", "Ann", (2024, 5, 1))));
        ledger.append(LedgerEntry::from_stay(&stay("A", "Ann", (2024, 5, 1))));

        assert_eq!(ids(&ledger.all()), vec!["B", "A"]);
        assert_eq!(ids(&ledger.query_by_owner("Ann")), vec!["B", "A"]);
    }

    #[test]
    fn test_owner_scoping_is_exact() {
        let mut ledger = TransactionLedger::open(MemoryStore::new());
        ledger.append(LedgerEntry::from_stay(&stay("A", "Ann", (2024, 1, 1))));
        ledger.append(LedgerEntry::from_walk_in(&walk_in("B", "Ben", (2024, 1, 2))));

        assert_eq!(ids(&ledger.query_by_owner("Ben")), vec!["B"]);
        assert_eq!(ids(&ledger.query_by_owner("Ann")), vec!["A"]);
        assert!(ledger.query_by_owner("ann").is_empty());
        assert!(ledger.query_by_owner("").is_empty());
        assert_eq!(ledger.all().len(), 2);
    }

    #[test]
    fn test_query_in_range() {
        let mut ledger = TransactionLedger::open(MemoryStore::new());
        for (id, month) in [("JAN", 1), ("FEB", 2), ("MAR", 3)] {
            ledger.append(LedgerEntry::from_stay(&stay(id, "Ann", (2024, month, 10))));
        }

        let range = DateRange::parse("2024-02-10", "2024-03-10");
        assert_eq!(ids(&ledger.query_by_owner_in_range("Ann", &range)), vec!["MAR", "FEB"]);
    }

    #[test]
    fn test_save_and_reopen() {
        let mut ledger = TransactionLedger::open(MemoryStore::new());
        ledger
            .record(LedgerEntry::from_stay(&stay("A", "Ann", (2024, 1, 1))))
            .unwrap();
        ledger
            .record(LedgerEntry::from_walk_in(&walk_in("B", "Ben", (2024, 1, 2))))
            .unwrap();

        let reopened = TransactionLedger::open(ledger.store().clone());
        assert_eq!(reopened.all(), ledger.all());
        assert_eq!(reopened.get("B"), ledger.get("B"));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let mut ledger = TransactionLedger::open(JsonFileStore::new(dir.path()));
        ledger
            .record(LedgerEntry::from_stay(&stay("A", "Ann", (2024, 1, 1))))
            .unwrap();

        let reopened = TransactionLedger::open(JsonFileStore::new(dir.path()));
        assert_eq!(reopened.len(), 1);
        assert_eq!(ids(&reopened.query_by_owner("Ann")), vec!["A"]);
    }

    #[test]
    fn test_corrupt_payload_yields_empty_ledger() {
        let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, "{not json");
        let ledger = TransactionLedger::open(store);

        assert!(ledger.is_empty());
        assert_eq!(ledger.store().get(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_wrong_shape_payload_yields_empty_ledger() {
        let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, r#"[{"id": 42}]"#);
        assert!(TransactionLedger::open(store).is_empty());
    }

    #[test]
    fn test_out_of_range_amount_in_store_yields_empty_ledger() {
        let entry = LedgerEntry::from_stay(&stay("A", "Ann", (2024, 1, 1)));
        let mut json = serde_json::to_value(vec![entry]).unwrap();
        json[0]["payload"]["ratePerNight"] = serde_json::json!("79228162514264337593543950335");
        json[0]["payload"]["nights"] = serde_json::json!(2);

        let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, json.to_string());
        let ledger = TransactionLedger::open(store);

        assert!(ledger.is_empty());
        assert_eq!(ledger.store().get(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_negative_amounts_in_store_are_coerced_on_load() {
        let entry = LedgerEntry::from_walk_in(&walk_in("W", "Ben", (2024, 1, 1)));
        let mut json = serde_json::to_value(vec![entry]).unwrap();
        json[0]["payload"]["amountPaid"] = serde_json::json!("-500");

        let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, json.to_string());
        let ledger = TransactionLedger::open(store);

        match ledger.get("W").unwrap().payload() {
            EntryPayload::WalkIn(bill) => {
                assert_eq!(bill.input().amount_paid, dec!(0));
                assert_eq!(bill.totals().balance, dec!(2000));
            }
            EntryPayload::Stay(_) => panic!("expected walk-in payload"),
        }
    }

    #[test]
    fn test_duplicate_ids_in_store_collapse() {
        let entry = LedgerEntry::from_stay(&stay("A", "Ann", (2024, 1, 1)));
        let raw = serde_json::to_string(&vec![entry.clone(), entry]).unwrap();
        let ledger = TransactionLedger::open(MemoryStore::with_value(DEFAULT_STORAGE_KEY, raw));

        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_custom_key() {
        let mut ledger = TransactionLedger::open_with_key(MemoryStore::new(), "front_desk");
        ledger
            .record(LedgerEntry::from_stay(&stay("A", "Ann", (2024, 1, 1))))
            .unwrap();

        assert_eq!(ledger.key(), "front_desk");
        assert!(ledger.store().get("front_desk").is_some());
        assert!(ledger.store().get(DEFAULT_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut ledger = TransactionLedger::open(ReadOnlyStore::default());
        let result = ledger.record(LedgerEntry::from_stay(&stay("A", "Ann", (2024, 1, 1))));

        assert!(matches!(result, Err(LedgerError::Store(StoreError::Unavailable(_)))));
        assert_eq!(ids(&ledger.query_by_owner("Ann")), vec!["A"]);
        assert!(ledger.save().is_err());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_corrupt_payload_in_read_only_store_still_opens_empty() {
        let store = ReadOnlyStore(MemoryStore::with_value(DEFAULT_STORAGE_KEY, "garbage"));
        assert!(TransactionLedger::open(store).is_empty());
    }
}
