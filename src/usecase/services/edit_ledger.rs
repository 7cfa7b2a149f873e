use crate::domain::entities::edit::EditEntry;
use crate::domain::entities::record::{CellValue, RowRecord, LATITUDE, LONGITUDE};
use crate::domain::errors::{LedgerLoadError, StorageError};
use crate::usecase::ports::storage::{KeyValueStore, LEDGER_KEY};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerChange {
    Appended,
    Replaced { index: usize },
}

/// Accepted edits, at most one per store name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditLedger {
    entries: Vec<EditEntry>,
}

impl EditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<EditEntry>) -> Self {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.upsert(entry);
        }
        ledger
    }

    /// Replaces the entry for the same store in place, otherwise appends.
    pub fn upsert(&mut self, entry: EditEntry) -> LedgerChange {
        match self
            .entries
            .iter()
            .position(|existing| existing.store_name == entry.store_name)
        {
            Some(index) => {
                self.entries[index] = entry;
                LedgerChange::Replaced { index }
            }
            None => {
                self.entries.push(entry);
                LedgerChange::Appended
            }
        }
    }

    pub fn entries(&self) -> &[EditEntry] {
        &self.entries
    }

    pub fn find(&self, store_name: &str) -> Option<&EditEntry> {
        self.entries
            .iter()
            .find(|entry| entry.store_name == store_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A missing key is an empty ledger, not an error.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, LedgerLoadError> {
        let Some(raw) = store.get(LEDGER_KEY)? else {
            return Ok(Self::new());
        };
        let entries: Vec<EditEntry> =
            serde_json::from_str(&raw).map_err(|err| LedgerLoadError::Parse(err.to_string()))?;
        Ok(Self::from_entries(entries))
    }

    pub fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.entries)
            .map_err(|err| StorageError::Write(err.to_string()))?;
        store.set(LEDGER_KEY, &raw)
    }

    /// Copies `records`, overwriting coordinates of every store with an entry.
    pub fn merge_onto(&self, records: &[RowRecord]) -> Vec<RowRecord> {
        records
            .iter()
            .map(|record| {
                let mut merged = record.clone();
                if let Some(entry) = self.find(&record.store_name()) {
                    merged.set(LATITUDE, CellValue::Number(entry.latitude));
                    merged.set(LONGITUDE, CellValue::Number(entry.longitude));
                }
                merged
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::geo::LatLng;
    use crate::domain::entities::record::{PROVINCE, STORE_NAME};
    use crate::infra::storage::memory::MemoryKvStore;

    fn entry(name: &str, lat: f64, lng: f64) -> EditEntry {
        EditEntry::new(
            name.to_string(),
            "P1".to_string(),
            LatLng::new(0.0, 0.0),
            LatLng::new(lat, lng),
        )
    }

    fn record(name: &str, lat: &str, lng: &str) -> RowRecord {
        RowRecord::new()
            .with(STORE_NAME, name)
            .with(PROVINCE, "P1")
            .with(LATITUDE, lat)
            .with(LONGITUDE, lng)
            .with("Manager", "Kim")
    }

    #[test]
    fn upsert_keeps_one_entry_per_store_with_last_value() {
        let mut ledger = EditLedger::new();
        let upserts = [
            ("A", 1.0, 1.0),
            ("B", 2.0, 2.0),
            ("A", 3.0, 3.0),
            ("C", 4.0, 4.0),
            ("B", 5.0, 5.0),
            ("A", 6.0, 6.0),
        ];
        for (name, lat, lng) in upserts {
            ledger.upsert(entry(name, lat, lng));
        }

        let names: Vec<&str> = ledger
            .entries()
            .iter()
            .map(|entry| entry.store_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"], "first-appearance order should hold");
        assert_eq!(ledger.find("A").map(|e| e.latitude), Some(6.0));
        assert_eq!(ledger.find("B").map(|e| e.latitude), Some(5.0));
    }

    #[test]
    fn upsert_reports_replacement_index() {
        let mut ledger = EditLedger::new();
        assert_eq!(ledger.upsert(entry("A", 1.0, 1.0)), LedgerChange::Appended);
        assert_eq!(ledger.upsert(entry("B", 1.0, 1.0)), LedgerChange::Appended);
        assert_eq!(
            ledger.upsert(entry("B", 2.0, 2.0)),
            LedgerChange::Replaced { index: 1 }
        );
    }

    #[test]
    fn merge_onto_only_touches_edited_rows() {
        let ledger = EditLedger::from_entries(vec![entry("B", -26.2, 28.1)]);
        let records = vec![record("A", "-26.1", "28.0"), record("B", "-25.0", "27.0")];

        let merged = ledger.merge_onto(&records);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], records[0], "unedited row should be unchanged");
        assert_eq!(merged[1].get(LATITUDE), Some(&CellValue::Number(-26.2)));
        assert_eq!(merged[1].get(LONGITUDE), Some(&CellValue::Number(28.1)));
        assert_eq!(merged[1].get("Manager"), Some(&CellValue::from("Kim")));
    }

    #[test]
    fn merge_onto_is_idempotent() {
        let ledger = EditLedger::from_entries(vec![entry("A", -26.2, 28.1)]);
        let records = vec![record("A", "-26.1", "28.0"), record("B", "N/A", "27.0")];

        let once = ledger.merge_onto(&records);
        let twice = ledger.merge_onto(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn persist_then_load_restores_entries() {
        let store = MemoryKvStore::new();
        let ledger = EditLedger::from_entries(vec![entry("A", 1.5, 2.5), entry("B", 3.5, 4.5)]);

        ledger.persist(&store).expect("persist should succeed");
        let loaded = EditLedger::load(&store).expect("load should succeed");

        assert_eq!(loaded, ledger);
    }

    #[test]
    fn load_without_key_is_empty() {
        let loaded = EditLedger::load(&MemoryKvStore::new()).expect("load should succeed");
        assert!(loaded.is_empty());
    }

    #[test]
    fn load_rejects_corrupt_json() {
        let store = MemoryKvStore::new();
        store
            .set(LEDGER_KEY, "{not json")
            .expect("seeding should succeed");

        assert!(matches!(
            EditLedger::load(&store),
            Err(LedgerLoadError::Parse(_))
        ));
    }

    #[test]
    fn load_collapses_duplicate_store_names() {
        let store = MemoryKvStore::new();
        let raw = serde_json::to_string(&vec![entry("A", 1.0, 1.0), entry("A", 2.0, 2.0)])
            .expect("fixture should serialize");
        store.set(LEDGER_KEY, &raw).expect("seeding should succeed");

        let loaded = EditLedger::load(&store).expect("load should succeed");

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.find("A").map(|e| e.latitude), Some(2.0));
    }
}
