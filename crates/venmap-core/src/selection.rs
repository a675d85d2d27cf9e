// ── Multi-select tracking ──
//
// Two independent selection sets live in the store: gallery venues
// (bulk attach) and proposal-tab associations (bulk status update).
// Both are cleared on every view transition and pruned against the
// cache after each refresh, so a selection can never outlive the rows
// it points at.

use std::collections::HashSet;
use std::hash::Hash;

/// An order-free set of selected entity ids.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet<T: Copy + Eq + Hash> {
    items: HashSet<T>,
}

impl<T: Copy + Eq + Hash> SelectionSet<T> {
    pub fn new() -> Self {
        Self {
            items: HashSet::new(),
        }
    }

    /// Flip membership of `item`. Returns `true` if it is now selected.
    pub fn toggle(&mut self, item: T) -> bool {
        if self.items.remove(&item) {
            false
        } else {
            self.items.insert(item);
            true
        }
    }

    pub fn contains(&self, item: T) -> bool {
        self.items.contains(&item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop every selected id that fails the predicate. Used to prune
    /// ids that vanished from the cache on refresh.
    pub fn retain(&mut self, keep: impl Fn(&T) -> bool) {
        self.items.retain(|item| keep(item));
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.items.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().copied().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_deselects() {
        let mut set = SelectionSet::new();
        assert!(set.toggle(7u32));
        assert!(set.contains(7));
        assert!(!set.toggle(7));
        assert!(set.is_empty());
    }

    #[test]
    fn clear_empties_the_set() {
        let mut set = SelectionSet::new();
        set.toggle(1u32);
        set.toggle(2);
        assert_eq!(set.len(), 2);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn retain_prunes_vanished_ids() {
        let mut set = SelectionSet::new();
        set.toggle(1u32);
        set.toggle(2);
        set.toggle(3);
        set.retain(|&n| n != 2);
        assert!(set.contains(1));
        assert!(!set.contains(2));
        assert!(set.contains(3));
    }
}
