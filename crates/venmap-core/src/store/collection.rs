// ── Generic reactive entity collection ──
//
// Lock-free concurrent storage with O(1) lookups and push-based
// change notification via `watch` channels.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;
use uuid::Uuid;

/// A lock-free, reactive collection for a single entity type.
///
/// Uses `DashMap` for O(1) concurrent lookups and `watch` channels
/// for push-based change notification. Every mutation bumps a version
/// counter and rebuilds the snapshot that subscribers receive.
pub(crate) struct EntityCollection<T: Clone + Send + Sync + 'static> {
    /// Primary storage, keyed by the entity's UUID.
    by_id: DashMap<Uuid, Arc<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Clone + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Insert or update an entity. Returns `true` if the id was new.
    pub(crate) fn upsert(&self, id: Uuid, entity: T) -> bool {
        let is_new = self.by_id.insert(id, Arc::new(entity)).is_none();
        self.rebuild_snapshot();
        self.bump_version();
        is_new
    }

    /// Insert or update an entity that is already `Arc`-wrapped, so
    /// the caller can hand out the exact stored allocation.
    pub(crate) fn upsert_arc(&self, id: Uuid, entity: Arc<T>) {
        self.by_id.insert(id, entity);
        self.rebuild_snapshot();
        self.bump_version();
    }

    /// Replace the whole collection, notifying subscribers once.
    ///
    /// A refresh must land as a single snapshot change -- not a clear
    /// followed by inserts -- so subscribers never observe a half-empty
    /// collection.
    pub(crate) fn replace_all(&self, entries: Vec<(Uuid, T)>) {
        self.by_id.clear();
        for (id, entity) in entries {
            self.by_id.insert(id, Arc::new(entity));
        }
        self.rebuild_snapshot();
        self.bump_version();
    }

    /// Remove an entity by id. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, id: &Uuid) -> Option<Arc<T>> {
        let removed = self.by_id.remove(id).map(|(_, v)| v);
        if removed.is_some() {
            self.rebuild_snapshot();
            self.bump_version();
        }
        removed
    }

    /// Remove every entity matching the predicate. Returns how many
    /// were dropped.
    pub(crate) fn remove_where(&self, pred: impl Fn(&T) -> bool) -> usize {
        let doomed: Vec<Uuid> = self
            .by_id
            .iter()
            .filter(|r| pred(r.value()))
            .map(|r| *r.key())
            .collect();
        for id in &doomed {
            self.by_id.remove(id);
        }
        if !doomed.is_empty() {
            self.rebuild_snapshot();
            self.bump_version();
        }
        doomed.len()
    }

    /// Look up an entity by id.
    pub(crate) fn get(&self, id: &Uuid) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Find the first entity matching the predicate.
    pub(crate) fn find(&self, pred: impl Fn(&T) -> bool) -> Option<Arc<T>> {
        self.by_id
            .iter()
            .find(|r| pred(r.value()))
            .map(|r| Arc::clone(r.value()))
    }

    pub(crate) fn contains(&self, id: &Uuid) -> bool {
        self.by_id.contains_key(id)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all values into a snapshot vec and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let values: Vec<Arc<T>> = self.by_id.iter().map(|r| Arc::clone(r.value())).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// Increment the version counter.
    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn upsert_returns_true_for_new_id() {
        let col: EntityCollection<String> = EntityCollection::new();
        assert!(col.upsert(Uuid::new_v4(), "hello".into()));
    }

    #[test]
    fn upsert_returns_false_for_existing_id() {
        let col: EntityCollection<String> = EntityCollection::new();
        let id = Uuid::new_v4();
        col.upsert(id, "hello".into());
        assert!(!col.upsert(id, "world".into()));
        assert_eq!(*col.get(&id).unwrap(), "world");
    }

    #[test]
    fn remove_drops_the_entity() {
        let col: EntityCollection<String> = EntityCollection::new();
        let id = Uuid::new_v4();
        col.upsert(id, "hello".into());

        let removed = col.remove(&id);
        assert_eq!(*removed.unwrap(), "hello");
        assert!(col.get(&id).is_none());
        assert!(col.is_empty());
    }

    #[test]
    fn replace_all_swaps_contents() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.upsert(Uuid::new_v4(), "old".into());

        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        col.replace_all(vec![(a, "x".into()), (b, "y".into())]);

        assert_eq!(col.len(), 2);
        assert_eq!(*col.get(&a).unwrap(), "x");
        assert_eq!(*col.get(&b).unwrap(), "y");
    }

    #[test]
    fn replace_all_notifies_subscribers_once() {
        let col: EntityCollection<String> = EntityCollection::new();
        let mut rx = col.subscribe();
        rx.mark_unchanged();

        col.replace_all(vec![
            (Uuid::new_v4(), "x".into()),
            (Uuid::new_v4(), "y".into()),
        ]);

        assert!(rx.has_changed().unwrap());
        let snap = rx.borrow_and_update().clone();
        assert_eq!(snap.len(), 2);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn remove_where_drops_matching_entities() {
        let col: EntityCollection<u32> = EntityCollection::new();
        col.upsert(Uuid::new_v4(), 1);
        col.upsert(Uuid::new_v4(), 2);
        col.upsert(Uuid::new_v4(), 3);

        let dropped = col.remove_where(|n| n % 2 == 1);
        assert_eq!(dropped, 2);
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let col: EntityCollection<String> = EntityCollection::new();
        assert!(col.snapshot().is_empty());

        col.upsert(Uuid::new_v4(), "x".into());
        col.upsert(Uuid::new_v4(), "y".into());

        assert_eq!(col.snapshot().len(), 2);
    }
}
