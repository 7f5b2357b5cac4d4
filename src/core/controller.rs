//! CRUD controller - validated add/edit/delete over an entity store
//!
//! Wraps an [`EntityStore`] with the clock and notifier. Validation happens
//! here, before the store is touched. A missing edit/delete target is a
//! silent guard: nothing changes, nothing is announced, and the caller gets
//! `None` back.

use std::rc::Rc;

use crate::core::clock::Clock;
use crate::core::notify::{NotificationKind, Notifier};
use crate::core::record::{Draft, Record};
use crate::core::store::EntityStore;
use crate::core::validation::ValidationErrors;

pub struct CrudController<R: Record> {
    store: EntityStore<R>,
    clock: Rc<dyn Clock>,
    notifier: Rc<dyn Notifier>,
}

impl<R: Record> CrudController<R> {
    pub fn new(store: EntityStore<R>, clock: Rc<dyn Clock>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            store,
            clock,
            notifier,
        }
    }

    pub fn list(&self) -> &[R] {
        self.store.list()
    }

    pub fn get(&self, id: u64) -> Option<&R> {
        self.store.get(id)
    }

    pub fn store(&self) -> &EntityStore<R> {
        &self.store
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Validate a draft and append the new record
    pub fn add(&mut self, draft: &R::Draft) -> Result<R, ValidationErrors> {
        let draft = draft.validate()?;
        let now = self.clock.now();
        let record = self.store.add(draft, now).clone();

        tracing::debug!(kind = %R::KIND, id = record.id(), "record added");
        self.notifier.notify(
            &format!("{} \"{}\" created", R::KIND.label(), record.name()),
            NotificationKind::Success,
        );
        Ok(record)
    }

    /// Validate a draft and overwrite the editable fields of record `id`
    ///
    /// A missing target is checked first, so it stays a silent no-op even
    /// when the draft is invalid.
    pub fn edit(&mut self, id: u64, draft: &R::Draft) -> Result<Option<R>, ValidationErrors> {
        if self.store.get(id).is_none() {
            tracing::warn!(kind = %R::KIND, id, "edit skipped: record not found");
            return Ok(None);
        }
        let draft = draft.validate()?;
        let now = self.clock.now();
        let record = match self.store.edit(id, draft, now) {
            Ok(record) => record.clone(),
            Err(e) => {
                tracing::warn!("edit skipped: {}", e);
                return Ok(None);
            }
        };

        tracing::debug!(kind = %R::KIND, id, "record updated");
        self.notifier.notify(
            &format!("{} \"{}\" updated", R::KIND.label(), record.name()),
            NotificationKind::Success,
        );
        Ok(Some(record))
    }

    /// Flip the active flag of record `id`
    pub fn set_active(&mut self, id: u64, active: bool) -> Option<R> {
        let now = self.clock.now();
        let record = match self.store.update(id, now, |r| r.set_active(active)) {
            Ok(record) => record.clone(),
            Err(e) => {
                tracing::warn!("status change skipped: {}", e);
                return None;
            }
        };

        let state = if active { "activated" } else { "deactivated" };
        self.notifier.notify(
            &format!("{} \"{}\" {}", R::KIND.label(), record.name(), state),
            NotificationKind::Success,
        );
        Some(record)
    }

    /// Remove record `id` for good
    pub fn delete(&mut self, id: u64) -> Option<R> {
        let removed = match self.store.delete(id) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("delete skipped: {}", e);
                return None;
            }
        };

        tracing::debug!(kind = %R::KIND, id, "record deleted");
        self.notifier.notify(
            &format!("{} \"{}\" deleted", R::KIND.label(), removed.name()),
            NotificationKind::Success,
        );
        Some(removed)
    }

    /// Append imported names as new records, in order
    ///
    /// Ids continue from the store's next id with a running offset, so they
    /// collide neither with existing ids nor with each other.
    pub fn merge_names(&mut self, names: Vec<String>) -> Vec<R> {
        let base = self.store.next_id() - 1;
        let now = self.clock.now();
        let records: Vec<R> = names
            .into_iter()
            .enumerate()
            .map(|(offset, name)| R::imported(base + offset as u64 + 1, name, now))
            .collect();

        self.store.extend(records.clone());
        tracing::debug!(kind = %R::KIND, count = records.len(), "records merged");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::notify::{Notification, NotificationCenter};
    use crate::entities::brand::{Brand, BrandDraft};
    use chrono::{Duration, TimeZone, Utc};
    use std::cell::RefCell;

    struct Fixture {
        clock: Rc<ManualClock>,
        seen: Rc<RefCell<Vec<Notification>>>,
        controller: CrudController<Brand>,
    }

    fn fixture() -> Fixture {
        let clock = Rc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        ));
        let center = Rc::new(NotificationCenter::new(clock.clone(), Duration::seconds(5)));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        center.subscribe(move |n| sink.borrow_mut().push(n.clone()));

        let now = clock.now();
        let store = EntityStore::seeded(vec![
            Brand::imported(1, "Guchi".into(), now),
            Brand::imported(2, "Prada".into(), now),
            Brand::imported(3, "Gloria Jeans".into(), now),
        ])
        .unwrap();

        Fixture {
            controller: CrudController::new(store, clock.clone(), center),
            clock,
            seen,
        }
    }

    fn draft(name: &str) -> BrandDraft {
        BrandDraft {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_add_trims_name_and_notifies() {
        let mut f = fixture();
        let added = f.controller.add(&draft("  Zara  ")).unwrap();
        assert_eq!(added.id, 4);
        assert_eq!(added.name, "Zara");
        assert_eq!(f.controller.list().len(), 4);

        let seen = f.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, NotificationKind::Success);
        assert_eq!(seen[0].message, "Brand \"Zara\" created");
    }

    #[test]
    fn test_add_blank_name_is_rejected_without_mutation() {
        let mut f = fixture();
        let errors = f.controller.add(&draft("   ")).unwrap_err();
        assert_eq!(errors.get("name"), Some("is required"));
        assert_eq!(f.controller.list().len(), 3);
        assert!(f.seen.borrow().is_empty());
    }

    #[test]
    fn test_duplicate_names_are_allowed() {
        let mut f = fixture();
        f.controller.add(&draft("Prada")).unwrap();
        let pradas = f.controller.list().iter().filter(|b| b.name == "Prada").count();
        assert_eq!(pradas, 2);
    }

    #[test]
    fn test_edit_refreshes_updated_at_only() {
        let mut f = fixture();
        let created = f.controller.get(2).unwrap().created_at;
        for i in 0..3 {
            f.clock.advance(Duration::seconds(1));
            let before = f.controller.get(2).unwrap().updated_at;
            let edited = f.controller.edit(2, &draft(&format!("Prada {}", i))).unwrap().unwrap();
            assert_eq!(edited.id, 2);
            assert_eq!(edited.created_at, created);
            assert!(edited.updated_at > before);
        }
    }

    #[test]
    fn test_edit_missing_target_is_silent() {
        let mut f = fixture();
        assert!(f.controller.edit(99, &draft("Ghost")).unwrap().is_none());
        assert!(f.seen.borrow().is_empty());
    }

    #[test]
    fn test_edit_missing_target_with_invalid_draft_is_silent() {
        let mut f = fixture();
        assert!(f.controller.edit(99, &draft("   ")).unwrap().is_none());
        assert_eq!(f.controller.list().len(), 3);
        assert!(f.seen.borrow().is_empty());
    }

    #[test]
    fn test_delete_then_scenario_order() {
        let mut f = fixture();
        f.controller.add(&draft("Zara")).unwrap();
        let removed = f.controller.delete(2).unwrap();
        assert_eq!(removed.name, "Prada");

        let names: Vec<&str> = f.controller.list().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Guchi", "Gloria Jeans", "Zara"]);
        assert!(f.controller.get(2).is_none());
    }

    #[test]
    fn test_delete_missing_target_is_silent() {
        let mut f = fixture();
        assert!(f.controller.delete(99).is_none());
        assert_eq!(f.controller.list().len(), 3);
        assert!(f.seen.borrow().is_empty());
    }

    #[test]
    fn test_set_active_toggles() {
        let mut f = fixture();
        let record = f.controller.set_active(1, false).unwrap();
        assert!(!record.is_active);
        assert_eq!(f.seen.borrow()[0].message, "Brand \"Guchi\" deactivated");
    }

    #[test]
    fn test_merge_names_continues_ids() {
        let mut f = fixture();
        let merged = f.controller.merge_names(vec!["Zara".into(), "Mango".into()]);
        let ids: Vec<u64> = merged.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![4, 5]);
        assert_eq!(f.controller.list().len(), 5);
    }
}
