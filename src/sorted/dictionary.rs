//! Immutable dictionary kept sorted by key.

use std::fmt;

use super::comparer::{SharedComparer, natural_order, same_comparer};
use super::search::{TieBreak, insertion_point};
use crate::error::CollectionError;
use crate::persistent::{PersistentTreeList, TreeListBuilder};
use crate::tree::{BranchingFactor, Iter, TreeCore};

/// An immutable map whose entries are kept sorted by key.
///
/// Only keys are ever compared; values may be any type. Entries are stored
/// as `(K, V)` pairs in a [`PersistentTreeList`], so lookups are O(log² N)
/// and iteration follows key order.
///
/// # Examples
///
/// ```rust
/// use treelist::sorted::SortedTreeDictionary;
///
/// let dictionary = SortedTreeDictionary::new()
///     .insert(3, "three")
///     .insert(1, "one")
///     .insert(2, "two");
///
/// let keys: Vec<&i32> = dictionary.keys().collect();
/// assert_eq!(keys, vec![&1, &2, &3]);
///
/// let updated = dictionary.insert(1, "ONE");
/// assert_eq!(dictionary.get(&1), Some(&"one"));   // Original unchanged
/// assert_eq!(updated.get(&1), Some(&"ONE"));      // New version
/// assert!(updated.try_add(2, "deux").is_err());
/// ```
pub struct SortedTreeDictionary<K, V> {
    entries: PersistentTreeList<(K, V)>,
    comparer: SharedComparer<K>,
}

/// Iterator over the entries of a [`SortedTreeDictionary`] in key order.
pub type Entries<'a, K, V> = std::iter::Map<Iter<'a, (K, V)>, fn(&'a (K, V)) -> (&'a K, &'a V)>;

impl<K: Ord + 'static, V> SortedTreeDictionary<K, V> {
    /// Creates an empty dictionary ordered by `K`'s [`Ord`] implementation.
    #[must_use]
    pub fn new() -> Self {
        Self::by_comparer(natural_order())
    }
}

impl<K, V> SortedTreeDictionary<K, V> {
    const fn from_parts(entries: PersistentTreeList<(K, V)>, comparer: SharedComparer<K>) -> Self {
        Self { entries, comparer }
    }

    /// Creates an empty dictionary ordered by `comparer`.
    #[must_use]
    pub fn by_comparer(comparer: SharedComparer<K>) -> Self {
        Self::from_parts(PersistentTreeList::new(), comparer)
    }

    /// Creates an empty dictionary ordered by `comparer` with the given page capacity.
    #[must_use]
    pub fn with_branching_factor(comparer: SharedComparer<K>, branching_factor: BranchingFactor) -> Self {
        Self::from_parts(PersistentTreeList::with_branching_factor(branching_factor), comparer)
    }

    /// Returns the comparer that orders the keys.
    #[must_use]
    pub const fn key_comparer(&self) -> &SharedComparer<K> {
        &self.comparer
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns where `key` is or would be stored.
    fn search(&self, key: &K) -> (bool, usize) {
        search_entries(self.entries.core(), &self.comparer, key)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log² N)
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key equal to `key` and its value.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        match self.search(key) {
            (true, index) => self.entries.get(index).map(split_entry),
            (false, _) => None,
        }
    }

    /// Returns `true` if an entry has a key equal to `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).0
    }

    /// Returns an iterator over the entries in key order.
    pub fn iter<'a>(&'a self) -> Entries<'a, K, V> {
        self.entries
            .iter()
            .map(split_entry as fn(&'a (K, V)) -> (&'a K, &'a V))
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    fn with_entries(&self, entries: PersistentTreeList<(K, V)>) -> Self {
        Self::from_parts(entries, SharedComparer::clone(&self.comparer))
    }

    #[cfg(test)]
    pub(crate) const fn entries(&self) -> &PersistentTreeList<(K, V)> {
        &self.entries
    }
}

impl<K, V: PartialEq> SortedTreeDictionary<K, V> {
    /// Returns `true` if some entry holds `value`.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.values().any(|candidate| candidate == value)
    }
}

impl<K: Clone, V: Clone> SortedTreeDictionary<K, V> {
    /// Returns a dictionary mapping `key` to `value`, replacing any existing entry.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let mut builder = self.entries.to_builder();
        upsert(&mut builder, &self.comparer, key, value);
        self.with_entries(builder.to_immutable())
    }

    /// Returns a dictionary with a new entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `key` is already present.
    pub fn try_add(&self, key: K, value: V) -> Result<Self, CollectionError> {
        let (found, index) = self.search(&key);
        if found {
            return Err(CollectionError::InvalidArgument {
                parameter: "key",
                reason: "an entry with the same key already exists",
            });
        }
        let mut builder = self.entries.to_builder();
        builder.insert_sorted(index, (key, value));
        Ok(self.with_entries(builder.to_immutable()))
    }

    /// Returns a dictionary with every entry of `entries` inserted, in one batch.
    ///
    /// A later entry replaces an earlier one with the same key.
    #[must_use]
    pub fn insert_range<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut builder = self.entries.to_builder();
        for (key, value) in entries {
            upsert(&mut builder, &self.comparer, key, value);
        }
        self.with_entries(builder.to_immutable())
    }

    /// Returns a dictionary without the entry for `key`.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        match self.search(key) {
            (true, index) => self
                .entries
                .remove_at(index)
                .map_or_else(|_| self.clone(), |entries| self.with_entries(entries)),
            (false, _) => self.clone(),
        }
    }

    /// Returns an empty dictionary with the same key comparer.
    #[must_use]
    pub fn clear(&self) -> Self {
        self.with_entries(self.entries.clear())
    }

    /// Returns this dictionary reordered by `comparer`.
    ///
    /// The same handle returns the dictionary as is. When several keys become
    /// equal under the new comparer, the entry that came first in the current
    /// order is kept.
    #[must_use]
    pub fn with_comparer(&self, comparer: SharedComparer<K>) -> Self {
        if same_comparer(&self.comparer, &comparer) {
            return self.clone();
        }
        let mut entries: Vec<(K, V)> = self.entries.iter().cloned().collect();
        entries.sort_by(|left, right| comparer.compare(&left.0, &right.0));
        entries.dedup_by(|right, left| comparer.compare(&left.0, &right.0).is_eq());
        let mut builder = TreeListBuilder::with_branching_factor(self.entries.branching_factor());
        builder.extend(entries);
        Self::from_parts(builder.to_immutable(), comparer)
    }
}

const fn split_entry<K, V>(entry: &(K, V)) -> (&K, &V) {
    (&entry.0, &entry.1)
}

fn search_entries<K, V>(entries: &TreeCore<(K, V)>, comparer: &SharedComparer<K>, key: &K) -> (bool, usize) {
    let outcome = insertion_point(entries.len(), TieBreak::BeforeEqual, |index| {
        comparer.compare(&entries.element(index).0, key)
    });
    (outcome.found, outcome.index)
}

fn upsert<K: Clone, V: Clone>(builder: &mut TreeListBuilder<(K, V)>, comparer: &SharedComparer<K>, key: K, value: V) {
    match search_entries(builder.core(), comparer, &key) {
        (true, index) => {
            if builder.set(index, (key, value)).is_err() {
                unreachable!("search found an entry past the end");
            }
        }
        (false, index) => builder.insert_sorted(index, (key, value)),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<K, V> Clone for SortedTreeDictionary<K, V> {
    fn clone(&self) -> Self {
        self.with_entries(self.entries.clone())
    }
}

impl<K: Ord + 'static, V> Default for SortedTreeDictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for SortedTreeDictionary<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SortedTreeDictionary<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Clone + Ord + 'static, V: Clone> FromIterator<(K, V)> for SortedTreeDictionary<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new().insert_range(iter)
    }
}

impl<'a, K, V> IntoIterator for &'a SortedTreeDictionary<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
