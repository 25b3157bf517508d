// src/state/history.rs
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calc::CalculationKind;
use crate::config::{CalculationRecord, InputValue};
use crate::file::history::{decode_history, encode_history, HISTORY_KEY};
use crate::file::storage::SessionStorage;

/// Saved calculations for the current session, newest first.
///
/// The in-memory sequence is authoritative; every mutation is followed by
/// a best-effort write of the whole sequence to session storage.
#[derive(Debug)]
pub struct HistoryStore<S: SessionStorage> {
    records: Vec<CalculationRecord>,
    storage: S,
}

impl<S: SessionStorage> HistoryStore<S> {
    /// Rehydrates from `storage`. Missing or malformed data yields an
    /// empty history.
    pub fn load(storage: S) -> Self {
        let records = match storage.get_item(HISTORY_KEY) {
            Ok(Some(content)) => match decode_history(&content) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Discarding persisted history: {:#}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read persisted history: {:#}", e);
                Vec::new()
            }
        };

        debug!(count = records.len(), "loaded history");
        Self { records, storage }
    }

    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CalculationRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Saves a new record at the front. A non-finite `result` is refused
    /// and leaves both the sequence and the persisted value untouched.
    pub fn append(
        &mut self,
        kind: CalculationKind,
        title: impl Into<String>,
        inputs: Vec<InputValue>,
        result: f64,
        note: Option<String>,
    ) -> Option<CalculationRecord> {
        let now = chrono::Utc::now().timestamp_millis();
        self.append_at(kind, title.into(), inputs, result, note, now)
    }

    fn append_at(
        &mut self,
        kind: CalculationKind,
        title: String,
        inputs: Vec<InputValue>,
        result: f64,
        note: Option<String>,
        now: i64,
    ) -> Option<CalculationRecord> {
        if !result.is_finite() {
            warn!(kind = kind.label(), result, "refusing to save a non-finite result");
            return None;
        }

        // Never older than the newest record, even if the clock stepped back.
        let created_at = self.records.first()
            .map_or(now, |newest| now.max(newest.created_at));

        let record = CalculationRecord {
            id: self.fresh_id(),
            kind,
            title,
            inputs,
            result,
            note,
            created_at,
        };

        self.records.insert(0, record.clone());
        debug!(id = %record.id, kind = record.kind.label(), "appended record");
        self.persist();
        Some(record)
    }

    /// Removes the record with `id`. Returns false when there was none.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() != before;

        debug!(id, removed, "deleted record");
        self.persist();
        removed
    }

    /// Empties the history and returns how many records were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();

        debug!(count, "cleared history");
        self.persist();
        count
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        let result = encode_history(&self.records)
            .and_then(|content| self.storage.set_item(HISTORY_KEY, &content));
        if let Err(e) = result {
            warn!("Failed to persist history: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use crate::file::storage::MemoryStorage;

    fn store() -> HistoryStore<MemoryStorage> {
        HistoryStore::load(MemoryStorage::new())
    }

    fn save_ip(store: &mut HistoryStore<MemoryStorage>, base: f64, part: f64) -> CalculationRecord {
        store.append(
            CalculationKind::Ip,
            CalculationKind::Ip.title(),
            vec![InputValue::new("X (Base)", base), InputValue::new("Y (Part)", part)],
            (part / base) * 100.0,
            None,
        ).unwrap()
    }

    fn ids(store: &HistoryStore<MemoryStorage>) -> Vec<String> {
        store.records().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_append_is_newest_first() {
        let mut store = store();
        let a = save_ip(&mut store, 200.0, 50.0);
        let b = save_ip(&mut store, 10.0, 1.0);

        assert_eq!(ids(&store), vec![b.id.clone(), a.id.clone()]);

        assert!(store.delete(&a.id));
        assert_eq!(ids(&store), vec![b.id]);
    }

    #[test]
    fn test_append_then_load_round_trips() {
        for count in 0..5 {
            let mut store = store();
            for i in 0..count {
                save_ip(&mut store, 3.0, i as f64 + 0.1);
            }
            store.append(
                CalculationKind::Vrl,
                CalculationKind::Vrl.title(),
                vec![
                    InputValue::new("Purchase Value", 1000.0),
                    InputValue::new("Market Value", 900.0),
                ],
                ((1000.0 / 900.0) - 1.0) * 100.0,
                Some("Recommend exit".to_string()),
            ).unwrap();

            let expected = store.records().to_vec();
            let reloaded = HistoryStore::load(store.into_storage());
            assert_eq!(reloaded.records(), expected.as_slice());
        }
    }

    #[test]
    fn test_delete_keeps_relative_order() {
        let mut store = store();
        let records: Vec<_> = (0..5).map(|i| save_ip(&mut store, 1.0, i as f64)).collect();

        assert!(store.delete(&records[2].id));
        let expected: Vec<String> = [4, 3, 1, 0].iter().map(|&i| records[i].id.clone()).collect();
        assert_eq!(ids(&store), expected);
        assert!(store.get(&records[2].id).is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = store();
        save_ip(&mut store, 1.0, 1.0);
        save_ip(&mut store, 1.0, 2.0);
        let before = store.records().to_vec();

        assert!(!store.delete("does-not-exist"));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let mut store = store();
        assert_eq!(store.clear(), 0);

        save_ip(&mut store, 1.0, 1.0);
        save_ip(&mut store, 1.0, 2.0);
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());

        let reloaded = HistoryStore::load(store.into_storage());
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = store();
        for i in 0..50 {
            save_ip(&mut store, 1.0, i as f64);
        }
        let mut ids = ids(&store);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_created_at_never_goes_backwards() {
        let mut store = store();
        let first = store.append_at(
            CalculationKind::Cvss, "a".to_string(), Vec::new(), 1.0, None, 2_000,
        ).unwrap();
        let second = store.append_at(
            CalculationKind::Cvss, "b".to_string(), Vec::new(), 1.0, None, 1_000,
        ).unwrap();
        let third = store.append_at(
            CalculationKind::Cvss, "c".to_string(), Vec::new(), 1.0, None, 3_000,
        ).unwrap();

        assert_eq!(first.created_at, 2_000);
        assert_eq!(second.created_at, 2_000);
        assert_eq!(third.created_at, 3_000);
    }

    #[test]
    fn test_append_stamps_current_time() {
        let before = chrono::Utc::now().timestamp_millis();
        let mut store = store();
        let record = save_ip(&mut store, 4.0, 1.0);
        let after = chrono::Utc::now().timestamp_millis();

        assert!(record.created_at >= before && record.created_at <= after);
        assert_eq!(record.result, 25.0);
    }

    #[test]
    fn test_non_finite_result_is_refused() {
        let mut store = store();
        let kept = save_ip(&mut store, 200.0, 50.0);
        let persisted = store.storage().get_item(HISTORY_KEY).unwrap();

        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let refused = store.append(CalculationKind::Cvss, "bad", Vec::new(), bad, None);
            assert!(refused.is_none());
        }

        assert_eq!(store.records(), &[kept.clone()]);
        assert_eq!(store.storage().get_item(HISTORY_KEY).unwrap(), persisted);

        let reloaded = HistoryStore::load(store.into_storage());
        assert_eq!(reloaded.records(), &[kept]);
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(HISTORY_KEY, "{{{ definitely not a history").unwrap();

        let mut store = HistoryStore::load(storage);
        assert!(store.is_empty());

        // The store keeps working and overwrites the bad value.
        let record = save_ip(&mut store, 2.0, 1.0);
        let reloaded = HistoryStore::load(store.into_storage());
        assert_eq!(reloaded.records(), &[record]);
    }

    #[derive(Debug, Default)]
    struct FailingStorage {
        writes: usize,
    }

    impl SessionStorage for FailingStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("storage unavailable"))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            self.writes += 1;
            Err(anyhow!("storage full"))
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }

        fn discard(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_storage_failures_keep_memory_authoritative() {
        let mut store = HistoryStore::load(FailingStorage::default());
        assert!(store.is_empty());

        let record = store.append(CalculationKind::Cvss, "t", Vec::new(), 100.0, None).unwrap();
        assert_eq!(store.records(), &[record.clone()]);
        assert!(store.delete(&record.id));
        assert_eq!(store.clear(), 0);

        assert_eq!(store.storage().writes, 3);
    }
}
