//! Entity store - the ordered in-memory list behind one catalog table

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::record::{EntityKind, Record};

/// Errors raised by direct store mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{kind} #{id} not found")]
    NotFound { kind: EntityKind, id: u64 },

    #[error("duplicate {kind} id {id} in seed data")]
    DuplicateId { kind: EntityKind, id: u64 },
}

/// Ordered collection of records of one kind
///
/// Insertion order is preserved. Edits replace in place and deletes remove by
/// id. Ids are never handed out twice: the store remembers the highest id it
/// has ever held, so deleting the newest record does not free its id.
#[derive(Debug, Clone)]
pub struct EntityStore<R: Record> {
    records: Vec<R>,
    high_water: u64,
}

impl<R: Record> Default for EntityStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> EntityStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            high_water: 0,
        }
    }

    /// Mount a store with pre-built records, bypassing `add`
    pub fn seeded(records: Vec<R>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            if store.get(record.id()).is_some() {
                return Err(StoreError::DuplicateId {
                    kind: R::KIND,
                    id: record.id(),
                });
            }
            store.push(record);
        }
        Ok(store)
    }

    /// The current ordered sequence
    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next added record will receive
    pub fn next_id(&self) -> u64 {
        let max_existing = self.records.iter().map(Record::id).max().unwrap_or(0);
        max_existing.max(self.high_water) + 1
    }

    /// Records matching a predicate, in store order
    pub fn filtered<F>(&self, predicate: F) -> Vec<R>
    where
        F: Fn(&R) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// Append a new record built from a validated draft
    pub fn add(&mut self, draft: R::Draft, now: DateTime<Utc>) -> &R {
        let record = R::create(self.next_id(), draft, now);
        self.push(record)
    }

    /// Mutate a record in place and refresh its `updated_at`
    ///
    /// `updated_at` never moves backwards, so `created_at <= updated_at`
    /// holds even if the clock does.
    pub fn update<F>(&mut self, id: u64, now: DateTime<Utc>, change: F) -> Result<&R, StoreError>
    where
        F: FnOnce(&mut R),
    {
        let idx = self.position(id)?;
        let record = &mut self.records[idx];
        let previous = record.updated_at();
        change(record);
        record.set_updated_at(now.max(previous));
        Ok(&self.records[idx])
    }

    /// Replace a record's editable fields
    pub fn edit(&mut self, id: u64, draft: R::Draft, now: DateTime<Utc>) -> Result<&R, StoreError> {
        self.update(id, now, |record| record.apply(draft))
    }

    /// Remove a record permanently
    pub fn delete(&mut self, id: u64) -> Result<R, StoreError> {
        let idx = self.position(id)?;
        Ok(self.records.remove(idx))
    }

    /// Append a batch of records whose ids were assigned by the caller
    pub fn extend(&mut self, records: Vec<R>) {
        for record in records {
            self.push(record);
        }
    }

    fn push(&mut self, record: R) -> &R {
        self.high_water = self.high_water.max(record.id());
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    fn position(&self, id: u64) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound { kind: R::KIND, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::brand::{Brand, BrandDraft};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    fn draft(name: &str) -> BrandDraft {
        BrandDraft {
            name: name.to_string(),
        }
    }

    fn seeded() -> EntityStore<Brand> {
        EntityStore::seeded(vec![
            Brand::imported(1, "Guchi".into(), t0()),
            Brand::imported(2, "Prada".into(), t0()),
            Brand::imported(3, "Gloria Jeans".into(), t0()),
        ])
        .unwrap()
    }

    #[test]
    fn test_add_assigns_max_plus_one() {
        let mut store = seeded();
        let added = store.add(draft("Zara"), t0()).clone();
        assert_eq!(added.id, 4);
        assert!(added.is_active);
        assert_eq!(added.created_at, added.updated_at);
        assert_eq!(store.list().last().unwrap().name, "Zara");
    }

    #[test]
    fn test_add_to_empty_store_starts_at_one() {
        let mut store: EntityStore<Brand> = EntityStore::new();
        assert_eq!(store.add(draft("Zara"), t0()).id, 1);
    }

    #[test]
    fn test_ids_are_not_reused_after_deleting_the_newest() {
        let mut store = seeded();
        store.delete(3).unwrap();
        assert_eq!(store.next_id(), 4);
        let added = store.add(draft("Zara"), t0()).id;
        assert_eq!(added, 4);
    }

    #[test]
    fn test_ids_increase_across_many_adds() {
        let mut store = seeded();
        for i in 0..20 {
            let max_before = store.list().iter().map(|b| b.id).max().unwrap();
            let id = store.add(draft(&format!("Brand {}", i)), t0()).id;
            assert!(id > max_before);
            if i % 3 == 0 {
                store.delete(id).unwrap();
            }
        }
        let ids: std::collections::HashSet<u64> = store.list().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_edit_keeps_position_id_and_created_at() {
        let mut store = seeded();
        let later = t0() + Duration::minutes(5);
        let edited = store.edit(2, draft("Prada Milano"), later).unwrap().clone();
        assert_eq!(edited.id, 2);
        assert_eq!(edited.created_at, t0());
        assert_eq!(edited.updated_at, later);
        assert_eq!(store.list()[1].name, "Prada Milano");
    }

    #[test]
    fn test_edit_never_moves_updated_at_backwards() {
        let mut store = seeded();
        let later = t0() + Duration::minutes(5);
        store.edit(1, draft("A"), later).unwrap();
        let edited = store.edit(1, draft("B"), t0() - Duration::hours(1)).unwrap();
        assert_eq!(edited.updated_at, later);
        assert!(edited.created_at <= edited.updated_at);
    }

    #[test]
    fn test_edit_missing_is_not_found() {
        let mut store = seeded();
        let err = store.edit(42, draft("Nope"), t0()).unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                kind: EntityKind::Brand,
                id: 42
            }
        );
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = seeded();
        store.delete(2).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get(2).is_none());

        assert!(store.delete(2).is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_seeded_rejects_duplicate_ids() {
        let err = EntityStore::seeded(vec![
            Brand::imported(1, "A".into(), t0()),
            Brand::imported(1, "B".into(), t0()),
        ])
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { id: 1, .. }));
    }

    #[test]
    fn test_filtered_preserves_order() {
        let mut store = seeded();
        store.update(2, t0(), |b| b.set_active(false)).unwrap();
        let active: Vec<String> = store
            .filtered(|b| b.is_active)
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(active, vec!["Guchi", "Gloria Jeans"]);
    }
}
