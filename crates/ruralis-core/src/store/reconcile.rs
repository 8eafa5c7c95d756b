// ── Reconciliation of confirmed remote results ──
//
// Applies what the server returned into the DataStore. Every write is a
// full structural replace of the affected record; nothing is merged with
// the previous local value.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::DataStore;
use crate::model::{Culture, CultureId, DashboardSummary, Producer, ProducerId};

impl DataStore {
    /// Replace the whole collection with a fresh listing, in server order.
    pub(crate) fn apply_load(&self, producers: Vec<Producer>) {
        self.producers.replace_all(producers);
        self.last_load.send_replace(Some(Utc::now()));
    }

    /// Append a newly created producer.
    pub(crate) fn apply_created(&self, producer: Producer) {
        if !self.producers.push(producer) {
            warn!("created producer id already present locally, replaced in place");
        }
    }

    /// Replace the local record with the server's canonical one.
    ///
    /// Returns `false` if no local record carries that id; the collection
    /// is then left as it was.
    pub(crate) fn apply_updated(&self, producer: Producer) -> bool {
        self.producers.replace(producer)
    }

    pub(crate) fn apply_deleted(&self, id: ProducerId) -> bool {
        self.producers.remove(id).is_some()
    }

    /// Append a culture to its owner's list. Returns `false` when the
    /// owner isn't present locally.
    pub(crate) fn apply_culture_added(&self, culture: Culture) -> bool {
        let owner = culture.producer_id;
        self.producers.update_with(owner, move |p| {
            let mut next = p.clone();
            next.cultures.push(culture);
            next
        })
    }

    /// Filter a culture out of its owner's list. Returns `false` when
    /// nothing was removed: the owner isn't present locally or doesn't
    /// hold that culture. The collection is then left as it was.
    pub(crate) fn apply_culture_removed(&self, producer_id: ProducerId, culture_id: CultureId) -> bool {
        let held = self
            .producers
            .get(producer_id)
            .is_some_and(|p| p.culture(culture_id).is_some());
        if !held {
            return false;
        }
        self.producers.update_with(producer_id, |p| {
            let mut next = p.clone();
            next.cultures.retain(|c| c.id != culture_id);
            next
        })
    }

    pub(crate) fn apply_dashboard(&self, summary: DashboardSummary) {
        self.dashboard.send_replace(Some(Arc::new(summary)));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn producer(id: u64, name: &str) -> Producer {
        Producer {
            id: ProducerId(id),
            tax_id: "123.456.789-09".into(),
            name: name.into(),
            farm_name: format!("Fazenda {name}"),
            city: "Sorriso".into(),
            state: "MT".into(),
            total_area: 100.0,
            agricultural_area: 40.0,
            vegetation_area: 40.0,
            cultures: Vec::new(),
        }
    }

    fn culture(id: u64, producer: u64, name: &str) -> Culture {
        Culture {
            id: CultureId(id),
            producer_id: ProducerId(producer),
            crop_year: "2024".into(),
            name: name.into(),
        }
    }

    fn names(store: &DataStore) -> Vec<String> {
        store
            .producers_snapshot()
            .values()
            .map(|p| p.name.clone())
            .collect()
    }

    #[test]
    fn load_replaces_everything_and_stamps_time() {
        let store = DataStore::new();
        store.apply_load(vec![producer(1, "A"), producer(2, "B")]);
        assert!(store.last_load().is_some());

        store.apply_load(vec![producer(3, "C")]);
        assert_eq!(names(&store), ["C"]);
        assert!(store.producer(ProducerId(1)).is_none());
    }

    #[test]
    fn load_is_idempotent() {
        let store = DataStore::new();
        store.apply_load(vec![producer(1, "A"), producer(2, "B")]);
        let first = store.producers_snapshot();
        store.apply_load(vec![producer(1, "A"), producer(2, "B")]);
        assert_eq!(*first, *store.producers_snapshot());
    }

    #[test]
    fn data_age_starts_after_first_load() {
        let store = DataStore::new();
        assert!(store.data_age().is_none());

        store.apply_load(Vec::new());
        let age = store.data_age().unwrap();
        assert!(age >= chrono::Duration::zero());
        assert!(age < chrono::Duration::seconds(5));
    }

    #[test]
    fn created_is_appended() {
        let store = DataStore::new();
        store.apply_load(vec![producer(1, "A")]);
        store.apply_created(producer(2, "B"));
        assert_eq!(names(&store), ["A", "B"]);
    }

    #[test]
    fn update_is_full_replace_not_merge() {
        let store = DataStore::new();
        let mut original = producer(1, "A");
        original.cultures.push(culture(10, 1, "Soja"));
        store.apply_load(vec![original, producer(2, "B")]);

        let canonical = producer(1, "A2");
        assert!(store.apply_updated(canonical.clone()));
        assert_eq!(*store.producer(ProducerId(1)).unwrap(), canonical);
        assert_eq!(names(&store), ["A2", "B"]);
    }

    #[test]
    fn update_of_unknown_id_leaves_collection_alone() {
        let store = DataStore::new();
        store.apply_load(vec![producer(1, "A")]);
        assert!(!store.apply_updated(producer(9, "Z")));
        assert_eq!(store.producer_count(), 1);
    }

    #[test]
    fn delete_removes_only_that_id() {
        let store = DataStore::new();
        store.apply_load(vec![producer(1, "A"), producer(2, "B")]);
        assert!(store.apply_deleted(ProducerId(1)));
        assert!(!store.apply_deleted(ProducerId(1)));
        assert_eq!(names(&store), ["B"]);
    }

    #[test]
    fn culture_added_to_exactly_one_producer() {
        let store = DataStore::new();
        store.apply_load(vec![producer(1, "A"), producer(2, "B")]);
        assert!(store.apply_culture_added(culture(10, 2, "Milho")));

        assert!(store.producer(ProducerId(1)).unwrap().cultures.is_empty());
        let owner = store.producer(ProducerId(2)).unwrap();
        assert_eq!(owner.cultures, vec![culture(10, 2, "Milho")]);
    }

    #[test]
    fn culture_for_absent_producer_is_not_applied() {
        let store = DataStore::new();
        store.apply_load(vec![producer(1, "A")]);
        let version = store.producers_version();
        assert!(!store.apply_culture_added(culture(10, 5, "Milho")));
        assert_eq!(store.producers_version(), version);
    }

    #[test]
    fn culture_removed_by_id() {
        let store = DataStore::new();
        let mut p = producer(1, "A");
        p.cultures = vec![culture(10, 1, "Soja"), culture(11, 1, "Café")];
        store.apply_load(vec![p]);

        assert!(store.apply_culture_removed(ProducerId(1), CultureId(10)));
        let cultures = &store.producer(ProducerId(1)).unwrap().cultures;
        assert_eq!(cultures, &vec![culture(11, 1, "Café")]);
    }

    #[test]
    fn removing_unheld_culture_changes_nothing() {
        let store = DataStore::new();
        let mut p = producer(1, "A");
        p.cultures = vec![culture(10, 1, "Soja")];
        store.apply_load(vec![p]);
        let version = store.producers_version();

        assert!(!store.apply_culture_removed(ProducerId(1), CultureId(99)));
        assert!(!store.apply_culture_removed(ProducerId(7), CultureId(10)));
        assert_eq!(store.producers_version(), version);
        assert_eq!(store.producer(ProducerId(1)).unwrap().cultures.len(), 1);
    }
}
