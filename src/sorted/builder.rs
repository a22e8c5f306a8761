//! Batch editing for [`SortedTreeList`].

use std::fmt;

use super::comparer::{SharedComparer, natural_order};
use super::list::SortedTreeList;
use super::search::{TieBreak, find, locate};
use crate::error::CollectionError;
use crate::persistent::TreeListBuilder;
use crate::tree::Iter;

/// A mutable staging area over a [`SortedTreeList`].
///
/// Shares the copy-on-write behavior of [`TreeListBuilder`]: each page is
/// copied at most once between freezes, whatever the number of additions.
/// Only sorted additions and removals are offered; there is no positional
/// insert that could break the order.
///
/// # Examples
///
/// ```rust
/// use treelist::sorted::SortedTreeList;
///
/// let list: SortedTreeList<i32> = [5, 1, 4].into_iter().collect();
/// let mut builder = list.to_builder();
/// builder.add(3);
/// builder.add(2);
/// assert!(builder.remove(&5));
///
/// let updated = builder.to_immutable();
/// assert_eq!(updated.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
/// assert_eq!(list.len(), 3);
/// ```
pub struct SortedTreeListBuilder<T> {
    builder: TreeListBuilder<T>,
    comparer: SharedComparer<T>,
}

impl<T: Ord + 'static> SortedTreeListBuilder<T> {
    /// Creates an empty builder ordered by `T`'s [`Ord`] implementation.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(TreeListBuilder::new(), natural_order())
    }
}

impl<T> SortedTreeListBuilder<T> {
    pub(crate) const fn from_parts(builder: TreeListBuilder<T>, comparer: SharedComparer<T>) -> Self {
        Self { builder, comparer }
    }

    /// Returns the comparer that orders this builder.
    #[must_use]
    pub const fn comparer(&self) -> &SharedComparer<T> {
        &self.comparer
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builder.len()
    }

    /// Returns `true` if the builder holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.builder.get(index)
    }

    /// Returns an iterator over the elements in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.builder.iter()
    }

    /// Returns the position of the first element comparing equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        find(self.builder.core(), &*self.comparer, value)
    }

    /// Returns `true` if an element compares equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Binary searches for `value` under the builder's comparer.
    ///
    /// # Errors
    ///
    /// `Err(index)` is the position where `value` would be inserted.
    pub fn binary_search(&self, value: &T) -> Result<usize, usize> {
        self.builder.binary_search_by(|element| self.comparer.compare(element, value))
    }

    /// Publishes the current contents as a [`SortedTreeList`].
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn to_immutable(&mut self) -> SortedTreeList<T> {
        SortedTreeList::from_parts(self.builder.to_immutable(), SharedComparer::clone(&self.comparer))
    }
}

impl<T: Clone> SortedTreeListBuilder<T> {
    /// Adds `value` after any equal elements.
    pub fn add(&mut self, value: T) {
        let outcome = locate(self.builder.core(), &*self.comparer, &value, TieBreak::AfterEqual);
        self.builder.insert_sorted(outcome.index, value);
    }

    /// Adds every element of `values`.
    pub fn add_range<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.add(value);
        }
    }

    /// Removes the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        self.builder.remove_at(index)
    }

    /// Removes every element matching `predicate`, returning how many were removed.
    pub fn remove_all<P>(&mut self, predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.builder.remove_all(predicate)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.builder.clear();
    }

    pub(crate) const fn inner(&self) -> &TreeListBuilder<T> {
        &self.builder
    }
}

impl<T: Clone + PartialEq> SortedTreeListBuilder<T> {
    /// Removes the first element equal to `value`, returning whether one was found.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.builder.index_of(value) {
            Some(index) => self.builder.remove_at(index).is_ok(),
            None => false,
        }
    }
}

impl<T: Ord + 'static> Default for SortedTreeListBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Extend<T> for SortedTreeListBuilder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedTreeListBuilder<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}
