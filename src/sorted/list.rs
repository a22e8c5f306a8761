//! Immutable sorted list allowing duplicates.

use std::fmt;

use super::builder::SortedTreeListBuilder;
use super::comparer::{SharedComparer, natural_order, same_comparer};
use super::search::{TieBreak, find, locate};
use crate::error::CollectionError;
use crate::persistent::{PersistentTreeList, TreeListBuilder};
use crate::tree::{BranchingFactor, Iter};

// =============================================================================
// SortedTreeList Definition
// =============================================================================

/// An immutable list kept sorted by a comparer.
///
/// Duplicates are allowed. A value equal to existing elements is inserted
/// after all of them, so equal elements keep their insertion order.
///
/// # Examples
///
/// ```rust
/// use treelist::sorted::SortedTreeList;
///
/// let list = SortedTreeList::new().add(5).add(1).add(3).add(1);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 1, 3, 5]);
/// assert_eq!(list.binary_search(&3), Ok(2));
/// assert_eq!(list.min(), Some(&1));
/// ```
pub struct SortedTreeList<T> {
    list: PersistentTreeList<T>,
    comparer: SharedComparer<T>,
}

impl<T: Ord + 'static> SortedTreeList<T> {
    /// Creates an empty list ordered by `T`'s [`Ord`] implementation.
    #[must_use]
    pub fn new() -> Self {
        Self::by_comparer(natural_order())
    }
}

impl<T> SortedTreeList<T> {
    pub(crate) const fn from_parts(list: PersistentTreeList<T>, comparer: SharedComparer<T>) -> Self {
        Self { list, comparer }
    }

    /// Creates an empty list ordered by `comparer`.
    #[must_use]
    pub fn by_comparer(comparer: SharedComparer<T>) -> Self {
        Self::from_parts(PersistentTreeList::new(), comparer)
    }

    /// Creates an empty list ordered by `comparer` with the given page capacity.
    #[must_use]
    pub fn with_branching_factor(comparer: SharedComparer<T>, branching_factor: BranchingFactor) -> Self {
        Self::from_parts(PersistentTreeList::with_branching_factor(branching_factor), comparer)
    }

    /// Returns the comparer that orders this list.
    #[inline]
    #[must_use]
    pub const fn comparer(&self) -> &SharedComparer<T> {
        &self.comparer
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the element at `index`, or `None` if out of bounds.
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

    /// Returns `true` if an element compares equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log² N)
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Returns the position of the first element comparing equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        find(self.list.core(), &*self.comparer, value)
    }

    /// Binary searches for `value` under the list's comparer.
    ///
    /// # Errors
    ///
    /// `Err(index)` is the position where `value` would be inserted.
    pub fn binary_search(&self, value: &T) -> Result<usize, usize> {
        self.list.binary_search_by(|element| self.comparer.compare(element, value))
    }

    /// Returns the index of the first element in `index..index + count` for
    /// which `equals(element, value)` holds.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the list.
    pub fn index_of_by<F>(&self, value: &T, index: usize, count: usize, equals: F) -> Result<Option<usize>, CollectionError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.list.index_of_by(value, index, count, equals)
    }

    /// Returns a builder that starts from this list's contents and comparer.
    #[must_use]
    pub fn to_builder(&self) -> SortedTreeListBuilder<T> {
        SortedTreeListBuilder::from_parts(self.list.to_builder(), SharedComparer::clone(&self.comparer))
    }

    pub(crate) const fn list(&self) -> &PersistentTreeList<T> {
        &self.list
    }

    fn with_list(&self, list: PersistentTreeList<T>) -> Self {
        Self::from_parts(list, SharedComparer::clone(&self.comparer))
    }
}

impl<T: Clone> SortedTreeList<T> {
    /// Returns a list with `value` inserted after any equal elements.
    ///
    /// # Complexity
    ///
    /// O(log² N)
    #[must_use]
    pub fn add(&self, value: T) -> Self {
        let outcome = locate(self.list.core(), &*self.comparer, &value, TieBreak::AfterEqual);
        let mut builder = self.list.to_builder();
        builder.insert_sorted(outcome.index, value);
        self.with_list(builder.to_immutable())
    }

    /// Returns a list with every element of `values` added, in one batch.
    #[must_use]
    pub fn add_range<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut builder = self.to_builder();
        builder.add_range(values);
        builder.to_immutable()
    }

    /// Returns a list without the first element for which `equals(element, value)` holds.
    ///
    /// The match is found by a linear scan, so `equals` may be unrelated to
    /// the list's ordering.
    #[must_use]
    pub fn remove_by<F>(&self, value: &T, equals: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.with_list(self.list.remove_by(value, equals))
    }

    /// Returns a list without the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    pub fn remove_at(&self, index: usize) -> Result<Self, CollectionError> {
        Ok(self.with_list(self.list.remove_at(index)?))
    }

    /// Returns a list without every element matching `predicate`.
    #[must_use]
    pub fn remove_all<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.with_list(self.list.remove_all(predicate))
    }

    /// Returns a list without the `count` elements starting at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the list.
    pub fn remove_range(&self, index: usize, count: usize) -> Result<Self, CollectionError> {
        Ok(self.with_list(self.list.remove_range(index, count)?))
    }

    /// Returns a sorted list holding the `count` elements starting at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the list.
    pub fn get_range(&self, index: usize, count: usize) -> Result<Self, CollectionError> {
        Ok(self.with_list(self.list.get_range(index, count)?))
    }

    /// Returns an empty list with the same comparer.
    #[must_use]
    pub fn clear(&self) -> Self {
        self.with_list(self.list.clear())
    }

    /// Returns this list reordered by `comparer`.
    ///
    /// If `comparer` is the handle this list already uses, the list is
    /// returned as is. Any other handle triggers a stable re-sort, even if it
    /// orders the same way.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::sorted::{SortedTreeList, shared};
    ///
    /// let ascending: SortedTreeList<i32> = [3, 1, 2].into_iter().collect();
    /// let descending = ascending.with_comparer(shared(|left: &i32, right: &i32| right.cmp(left)));
    /// assert_eq!(descending.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparer(&self, comparer: SharedComparer<T>) -> Self {
        if same_comparer(&self.comparer, &comparer) {
            return self.clone();
        }
        let sorted = self.list.sort_by(|left, right| comparer.compare(left, right));
        Self::from_parts(sorted, comparer)
    }

    /// Clones the whole list into `destination` starting at `destination_index`.
    ///
    /// # Errors
    ///
    /// See [`TreeList::copy_to`](crate::tree::TreeList::copy_to).
    pub fn copy_to(&self, destination: Option<&mut [T]>, destination_index: isize) -> Result<(), CollectionError> {
        self.list.copy_to(destination, destination_index)
    }
}

impl<T: Clone + PartialEq> SortedTreeList<T> {
    /// Returns a list without the first element equal to `value`.
    #[must_use]
    pub fn remove(&self, value: &T) -> Self {
        self.with_list(self.list.remove(value))
    }
}

impl<T: Clone> TreeListBuilder<T> {
    /// Inserts at a position produced by a sorted search over this builder.
    pub(crate) fn insert_sorted(&mut self, index: usize, value: T) {
        if self.insert(index, value).is_err() {
            unreachable!("sorted search returned a position past the end");
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Clone for SortedTreeList<T> {
    fn clone(&self) -> Self {
        self.with_list(self.list.clone())
    }
}

impl<T: Ord + 'static> Default for SortedTreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for SortedTreeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedTreeList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + Ord + 'static> FromIterator<T> for SortedTreeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new().add_range(iter)
    }
}

impl<'a, T> IntoIterator for &'a SortedTreeList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
