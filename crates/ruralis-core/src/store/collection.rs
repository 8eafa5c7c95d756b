// ── Ordered reactive entity collection ──
//
// Copy-on-write storage: the whole map lives behind an `Arc` inside a
// `watch` channel and every mutation publishes a fresh map. Readers that
// hold a snapshot keep seeing the state they captured.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::watch;

use crate::model::Keyed;

/// Immutable, insertion-ordered view of a collection.
pub type Snapshot<T> = Arc<IndexMap<<T as Keyed>::Key, Arc<T>>>;

/// A reactive collection for a single entity type.
///
/// Lookups are O(1) by key; iteration follows insertion order, which for
/// producers is the order the server returned them in. Mutations run
/// inside `send_if_modified`, so concurrent writers serialize on the
/// channel lock and subscribers are only woken by real changes.
pub(crate) struct EntityCollection<T: Keyed + Send + Sync + 'static> {
    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    snapshot: watch::Sender<Snapshot<T>>,
}

impl<T: Keyed + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(IndexMap::new()));
        Self { version, snapshot }
    }

    /// Replace every entity, keeping the iteration order of `entities`.
    pub(crate) fn replace_all(&self, entities: impl IntoIterator<Item = T>) {
        let map: IndexMap<_, _> = entities
            .into_iter()
            .map(|e| (e.key(), Arc::new(e)))
            .collect();
        self.snapshot.send_modify(|snap| *snap = Arc::new(map));
        self.bump_version();
    }

    /// Append an entity. An existing entry with the same key is replaced
    /// in place instead. Returns `true` if the key was new.
    pub(crate) fn push(&self, entity: T) -> bool {
        let key = entity.key();
        let mut is_new = false;
        self.snapshot.send_modify(|snap| {
            let mut next = IndexMap::clone(snap);
            is_new = next.insert(key, Arc::new(entity)).is_none();
            *snap = Arc::new(next);
        });
        self.bump_version();
        is_new
    }

    /// Replace the entity with the same key, keeping its position.
    /// Returns `false` (and changes nothing) if the key is absent.
    pub(crate) fn replace(&self, entity: T) -> bool {
        let key = entity.key();
        self.mutate(|snap| {
            if !snap.contains_key(&key) {
                return false;
            }
            let mut next = IndexMap::clone(snap);
            next.insert(key, Arc::new(entity));
            *snap = Arc::new(next);
            true
        })
    }

    /// Remove an entity by key. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, key: T::Key) -> Option<Arc<T>> {
        let mut removed = None;
        self.mutate(|snap| {
            if !snap.contains_key(&key) {
                return false;
            }
            let mut next = IndexMap::clone(snap);
            removed = next.shift_remove(&key);
            *snap = Arc::new(next);
            true
        });
        removed
    }

    /// Rebuild the entity under `key` from its current value.
    /// Returns `false` if the key is absent.
    pub(crate) fn update_with(&self, key: T::Key, f: impl FnOnce(&T) -> T) -> bool {
        self.mutate(|snap| {
            let Some(current) = snap.get(&key) else {
                return false;
            };
            let updated = Arc::new(f(current));
            let mut next = IndexMap::clone(snap);
            next.insert(key, updated);
            *snap = Arc::new(next);
            true
        })
    }

    pub(crate) fn get(&self, key: T::Key) -> Option<Arc<T>> {
        self.snapshot.borrow().get(&key).cloned()
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Apply a conditional mutation; the version only moves when `f`
    /// reports a change.
    fn mutate(&self, f: impl FnOnce(&mut Snapshot<T>) -> bool) -> bool {
        let changed = self.snapshot.send_if_modified(f);
        if changed {
            self.bump_version();
        }
        changed
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u64,
        label: &'static str,
    }

    impl Keyed for Item {
        type Key = u64;

        fn key(&self) -> u64 {
            self.id
        }
    }

    fn item(id: u64, label: &'static str) -> Item {
        Item { id, label }
    }

    fn labels(col: &EntityCollection<Item>) -> Vec<&'static str> {
        col.snapshot().values().map(|i| i.label).collect()
    }

    #[test]
    fn replace_all_keeps_given_order() {
        let col = EntityCollection::new();
        col.replace_all([item(3, "c"), item(1, "a"), item(2, "b")]);
        assert_eq!(labels(&col), ["c", "a", "b"]);
        assert_eq!(col.len(), 3);
    }

    #[test]
    fn push_appends_and_reports_new_key() {
        let col = EntityCollection::new();
        assert!(col.push(item(1, "a")));
        assert!(col.push(item(2, "b")));
        assert!(!col.push(item(1, "a2")));
        assert_eq!(labels(&col), ["a2", "b"]);
    }

    #[test]
    fn replace_keeps_position() {
        let col = EntityCollection::new();
        col.replace_all([item(1, "a"), item(2, "b"), item(3, "c")]);
        assert!(col.replace(item(2, "B")));
        assert_eq!(labels(&col), ["a", "B", "c"]);
    }

    #[test]
    fn replace_of_absent_key_is_ignored() {
        let col = EntityCollection::new();
        col.replace_all([item(1, "a")]);
        let before = col.version();
        assert!(!col.replace(item(9, "z")));
        assert_eq!(labels(&col), ["a"]);
        assert_eq!(col.version(), before);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let col = EntityCollection::new();
        col.replace_all([item(1, "a"), item(2, "b"), item(3, "c")]);
        assert_eq!(col.remove(2).unwrap().label, "b");
        assert!(col.remove(2).is_none());
        assert_eq!(labels(&col), ["a", "c"]);
    }

    #[test]
    fn update_with_rebuilds_single_entry() {
        let col = EntityCollection::new();
        col.replace_all([item(1, "a"), item(2, "b")]);
        assert!(col.update_with(1, |i| Item { label: "A", ..i.clone() }));
        assert!(!col.update_with(7, |i| i.clone()));
        assert_eq!(labels(&col), ["A", "b"]);
    }

    #[test]
    fn held_snapshot_is_not_affected_by_later_writes() {
        let col = EntityCollection::new();
        col.replace_all([item(1, "a")]);
        let held = col.snapshot();
        col.push(item(2, "b"));
        col.remove(1);
        assert_eq!(held.len(), 1);
        assert_eq!(held.get(&1).unwrap().label, "a");
    }

    #[test]
    fn subscribers_see_each_mutation() {
        let col = EntityCollection::new();
        let mut rx = col.subscribe();
        col.push(item(1, "a"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
        col.replace(item(5, "missing"));
        assert!(!rx.has_changed().unwrap());
    }
}
