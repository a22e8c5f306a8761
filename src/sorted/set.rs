//! Immutable sorted set and its builder.
//!
//! Set algebra walks both operands once in order (see [`MergeJoin`]) instead
//! of probing one set per element of the other, so every binary operation is
//! O(n + m) comparisons plus the cost of building the result.

use std::fmt;

use super::comparer::{SharedComparer, natural_order, same_comparer};
use super::merge::{MergeJoin, Overlap, Side};
use super::search::{TieBreak, find, locate};
use crate::persistent::{PersistentTreeList, TreeListBuilder};
use crate::tree::{BranchingFactor, Iter};

// =============================================================================
// SortedTreeSet Definition
// =============================================================================

/// An immutable set of elements kept sorted by a comparer.
///
/// Two elements are the same member when the comparer reports them equal.
///
/// # Examples
///
/// ```rust
/// use treelist::sorted::SortedTreeSet;
///
/// let set: SortedTreeSet<i32> = [3, 1, 2, 3].into_iter().collect();
/// assert_eq!(set.len(), 3);
///
/// let other: SortedTreeSet<i32> = [2, 3, 4].into_iter().collect();
/// let union = set.union(&other);
/// let intersection = set.intersect(&other);
///
/// assert_eq!(union.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
/// assert_eq!(intersection.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
/// ```
pub struct SortedTreeSet<T> {
    list: PersistentTreeList<T>,
    comparer: SharedComparer<T>,
}

impl<T: Ord + 'static> SortedTreeSet<T> {
    /// Creates an empty set ordered by `T`'s [`Ord`] implementation.
    #[must_use]
    pub fn new() -> Self {
        Self::by_comparer(natural_order())
    }
}

impl<T> SortedTreeSet<T> {
    const fn from_parts(list: PersistentTreeList<T>, comparer: SharedComparer<T>) -> Self {
        Self { list, comparer }
    }

    /// Creates an empty set ordered by `comparer`.
    #[must_use]
    pub fn by_comparer(comparer: SharedComparer<T>) -> Self {
        Self::from_parts(PersistentTreeList::new(), comparer)
    }

    /// Creates an empty set ordered by `comparer` with the given page capacity.
    #[must_use]
    pub fn with_branching_factor(comparer: SharedComparer<T>, branching_factor: BranchingFactor) -> Self {
        Self::from_parts(PersistentTreeList::with_branching_factor(branching_factor), comparer)
    }

    /// Returns the comparer that orders this set.
    #[inline]
    #[must_use]
    pub const fn key_comparer(&self) -> &SharedComparer<T> {
        &self.comparer
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the element with rank `index`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.list.get(index)
    }

    /// Returns an iterator over the elements in sorted order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Returns the smallest element.
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the largest element.
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|last| self.get(last))
    }

    /// Returns the rank of the member equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log² N)
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        find(self.list.core(), &*self.comparer, value)
    }

    /// Returns `true` if `value` is a member.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Returns the stored member equal to `value`.
    ///
    /// Useful when the comparer only looks at part of the element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::sorted::{SortedTreeSet, shared};
    ///
    /// let by_id = shared(|left: &(u32, &str), right: &(u32, &str)| left.0.cmp(&right.0));
    /// let set = SortedTreeSet::by_comparer(by_id).add((7, "seven"));
    /// assert_eq!(set.try_get_value(&(7, "")), Some(&(7, "seven")));
    /// ```
    #[must_use]
    pub fn try_get_value(&self, value: &T) -> Option<&T> {
        self.index_of(value).and_then(|index| self.get(index))
    }

    /// Returns the other set's members in this set's order.
    ///
    /// Sharing a comparer means `other` is already in the right order;
    /// otherwise its members are re-sorted and deduplicated first.
    fn aligned<'a>(&self, other: &'a Self) -> Vec<&'a T> {
        let mut members: Vec<&'a T> = other.iter().collect();
        if !same_comparer(&self.comparer, &other.comparer) {
            members.sort_by(|left, right| self.comparer.compare(left, right));
            members.dedup_by(|right, left| self.comparer.compare(left, right).is_eq());
        }
        members
    }

    fn overlap(&self, other: &Self) -> Overlap {
        let members = self.aligned(other);
        Overlap::measure(MergeJoin::new(self.iter(), members.iter().copied(), |left: &T, right: &T| {
            self.comparer.compare(left, right)
        }))
    }

    /// Returns `true` if every member of `self` is in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.overlap(other).only_left == 0
    }

    /// Returns `true` if every member of `self` is in `other`, and `other` has more.
    #[must_use]
    pub fn is_proper_subset_of(&self, other: &Self) -> bool {
        let overlap = self.overlap(other);
        overlap.only_left == 0 && overlap.only_right > 0
    }

    /// Returns `true` if every member of `other` is in `self`.
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.overlap(other).only_right == 0
    }

    /// Returns `true` if every member of `other` is in `self`, and `self` has more.
    #[must_use]
    pub fn is_proper_superset_of(&self, other: &Self) -> bool {
        let overlap = self.overlap(other);
        overlap.only_right == 0 && overlap.only_left > 0
    }

    /// Returns `true` if the sets share at least one member.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let members = self.aligned(other);
        MergeJoin::new(self.iter(), members.iter().copied(), |left: &T, right: &T| {
            self.comparer.compare(left, right)
        })
        .any(|side| matches!(side, Side::Both(..)))
    }

    /// Returns `true` if the sets have exactly the same members.
    #[must_use]
    pub fn set_equals(&self, other: &Self) -> bool {
        let overlap = self.overlap(other);
        overlap.only_left == 0 && overlap.only_right == 0
    }

    /// Returns a builder that starts from this set's members and comparer.
    #[must_use]
    pub fn to_builder(&self) -> SortedTreeSetBuilder<T> {
        SortedTreeSetBuilder {
            builder: self.list.to_builder(),
            comparer: SharedComparer::clone(&self.comparer),
        }
    }

    pub(crate) const fn list(&self) -> &PersistentTreeList<T> {
        &self.list
    }

    fn with_list(&self, list: PersistentTreeList<T>) -> Self {
        Self::from_parts(list, SharedComparer::clone(&self.comparer))
    }
}

impl<T: Clone> SortedTreeSet<T> {
    /// Returns a set with `value` added; unchanged if an equal member exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::sorted::SortedTreeSet;
    ///
    /// let once = SortedTreeSet::new().add(1);
    /// let twice = once.add(1);
    /// assert_eq!(once, twice);
    /// ```
    #[must_use]
    pub fn add(&self, value: T) -> Self {
        let outcome = locate(self.list.core(), &*self.comparer, &value, TieBreak::BeforeEqual);
        if outcome.found {
            return self.clone();
        }
        let mut builder = self.list.to_builder();
        builder.insert_sorted(outcome.index, value);
        self.with_list(builder.to_immutable())
    }

    /// Returns a set without the member equal to `value`.
    #[must_use]
    pub fn remove(&self, value: &T) -> Self {
        match self.index_of(value).and_then(|index| self.list.remove_at(index).ok()) {
            Some(list) => self.with_list(list),
            None => self.clone(),
        }
    }

    /// Returns an empty set with the same comparer.
    #[must_use]
    pub fn clear(&self) -> Self {
        self.with_list(self.list.clear())
    }

    /// Builds a set from merge output, keeping the elements `pick` selects.
    fn collect_merge<'a, P>(&'a self, other: &'a Self, mut pick: P) -> Self
    where
        P: FnMut(Side<'a, T>) -> Option<&'a T>,
    {
        let members = self.aligned(other);
        let mut builder = TreeListBuilder::with_branching_factor(self.list.branching_factor());
        builder.extend(
            MergeJoin::new(self.iter(), members.iter().copied(), |left: &T, right: &T| {
                self.comparer.compare(left, right)
            })
            .filter_map(&mut pick)
            .cloned(),
        );
        self.with_list(builder.to_immutable())
    }

    /// Returns the members of either set. Members of both keep `self`'s copy.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        self.collect_merge(other, |side| match side {
            Side::Left(value) | Side::Both(value, _) | Side::Right(value) => Some(value),
        })
    }

    /// Returns the members found in both sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        self.collect_merge(other, |side| match side {
            Side::Both(value, _) => Some(value),
            _ => None,
        })
    }

    /// Returns the members of `self` that are not in `other`.
    #[must_use]
    pub fn except(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        self.collect_merge(other, |side| match side {
            Side::Left(value) => Some(value),
            _ => None,
        })
    }

    /// Returns the members found in exactly one of the sets.
    #[must_use]
    pub fn symmetric_except(&self, other: &Self) -> Self {
        self.collect_merge(other, |side| match side {
            Side::Left(value) | Side::Right(value) => Some(value),
            Side::Both(..) => None,
        })
    }

    /// Returns this set reordered by `comparer`.
    ///
    /// The same handle returns the set as is. Members that become equal under
    /// the new comparer collapse into the first of them in the current order.
    #[must_use]
    pub fn with_comparer(&self, comparer: SharedComparer<T>) -> Self {
        if same_comparer(&self.comparer, &comparer) {
            return self.clone();
        }
        let mut members: Vec<T> = self.iter().cloned().collect();
        members.sort_by(|left, right| comparer.compare(left, right));
        members.dedup_by(|right, left| comparer.compare(left, right).is_eq());
        let mut builder = TreeListBuilder::with_branching_factor(self.list.branching_factor());
        builder.extend(members);
        Self::from_parts(builder.to_immutable(), comparer)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Clone for SortedTreeSet<T> {
    fn clone(&self) -> Self {
        self.with_list(self.list.clone())
    }
}

impl<T: Ord + 'static> Default for SortedTreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for SortedTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedTreeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Clone + Ord + 'static> FromIterator<T> for SortedTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = Self::new().to_builder();
        builder.extend(iter);
        builder.to_immutable()
    }
}

impl<'a, T> IntoIterator for &'a SortedTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// SortedTreeSetBuilder
// =============================================================================

/// A mutable staging area over a [`SortedTreeSet`].
///
/// # Examples
///
/// ```rust
/// use treelist::sorted::SortedTreeSet;
///
/// let mut builder = SortedTreeSet::new().to_builder();
/// assert!(builder.add(2));
/// assert!(builder.add(1));
/// assert!(!builder.add(2));
///
/// let set = builder.to_immutable();
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
/// ```
pub struct SortedTreeSetBuilder<T> {
    builder: TreeListBuilder<T>,
    comparer: SharedComparer<T>,
}

impl<T> SortedTreeSetBuilder<T> {
    /// Returns the comparer that orders this builder.
    #[must_use]
    pub const fn key_comparer(&self) -> &SharedComparer<T> {
        &self.comparer
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builder.len()
    }

    /// Returns `true` if the builder holds no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }

    /// Returns the member with rank `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.builder.get(index)
    }

    /// Returns an iterator over the members in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.builder.iter()
    }

    /// Returns `true` if `value` is a member.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        find(self.builder.core(), &*self.comparer, value).is_some()
    }

    /// Publishes the current members as a [`SortedTreeSet`].
    #[must_use]
    pub fn to_immutable(&mut self) -> SortedTreeSet<T> {
        SortedTreeSet::from_parts(self.builder.to_immutable(), SharedComparer::clone(&self.comparer))
    }

    pub(crate) const fn inner(&self) -> &TreeListBuilder<T> {
        &self.builder
    }
}

impl<T: Clone> SortedTreeSetBuilder<T> {
    /// Adds `value` unless an equal member exists; returns whether it was added.
    pub fn add(&mut self, value: T) -> bool {
        let outcome = locate(self.builder.core(), &*self.comparer, &value, TieBreak::BeforeEqual);
        if outcome.found {
            return false;
        }
        self.builder.insert_sorted(outcome.index, value);
        true
    }

    /// Removes the member equal to `value`; returns whether one was found.
    pub fn remove(&mut self, value: &T) -> bool {
        match find(self.builder.core(), &*self.comparer, value) {
            Some(index) => self.builder.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.builder.clear();
    }
}

impl<T: Clone> Extend<T> for SortedTreeSetBuilder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedTreeSetBuilder<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}
