//! Immutable indexed list with structural sharing.

use std::cmp::Ordering;
use std::fmt;

use super::builder::TreeListBuilder;
use crate::error::{CollectionError, check_range};
use crate::tree::{BranchingFactor, Iter, OwnerToken, TreeCore};

// =============================================================================
// PersistentTreeList Definition
// =============================================================================

/// An immutable list with O(log N) indexed access, insertion and removal.
///
/// Every "modifying" method returns a new list and leaves `self` untouched.
/// The two lists share all pages except those on the path to the edit, so a
/// single insertion allocates O(log N) pages.
///
/// Single edits run through a throwaway [`TreeListBuilder`]; bulk edits
/// (`add_range`, `remove_all`, `insert_range`, ...) run the whole batch
/// through one builder. For long sequences of edits, use
/// [`to_builder`](Self::to_builder) directly.
///
/// # Examples
///
/// ```rust
/// use treelist::persistent::PersistentTreeList;
///
/// let list: PersistentTreeList<i32> = (0..5).collect();
/// let inserted = list.insert(2, 100).unwrap();
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
/// assert_eq!(inserted.iter().copied().collect::<Vec<_>>(), vec![0, 1, 100, 2, 3, 4]);
/// ```
pub struct PersistentTreeList<T> {
    core: TreeCore<T>,
}

impl<T> PersistentTreeList<T> {
    pub(crate) const fn from_core(core: TreeCore<T>) -> Self {
        Self { core }
    }

    pub(crate) const fn core(&self) -> &TreeCore<T> {
        &self.core
    }

    /// Creates an empty list with the default branching factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::persistent::PersistentTreeList;
    ///
    /// let list: PersistentTreeList<i32> = PersistentTreeList::new();
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_branching_factor(BranchingFactor::DEFAULT)
    }

    /// Creates an empty list whose pages hold up to `branching_factor` entries.
    #[must_use]
    pub fn with_branching_factor(branching_factor: BranchingFactor) -> Self {
        Self::from_core(TreeCore::new(branching_factor, OwnerToken::SHARED))
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Returns the branching factor of the underlying tree.
    #[inline]
    #[must_use]
    pub const fn branching_factor(&self) -> BranchingFactor {
        self.core.branching_factor()
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.core.get(index)
    }

    /// Returns an iterator over the elements in index order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.core.iter()
    }

    /// Returns a builder that starts from this list's contents.
    ///
    /// # Complexity
    ///
    /// O(1); pages are copied lazily as the builder edits them.
    #[must_use]
    pub fn to_builder(&self) -> TreeListBuilder<T> {
        TreeListBuilder::from_core(self.core.clone())
    }

    /// Returns the index of the first element in `index..index + count` for
    /// which `equals(element, value)` holds.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the list.
    pub fn index_of_by<F>(&self, value: &T, index: usize, count: usize, mut equals: F) -> Result<Option<usize>, CollectionError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        check_range(index, count, self.len())?;
        Ok(self.core.position(index, count, |element| equals(element, value)))
    }

    /// Binary searches the list, as [`slice::binary_search_by`] does.
    ///
    /// # Errors
    ///
    /// `Err(index)` is the position where a matching element could be inserted.
    ///
    /// # Complexity
    ///
    /// O(log² N)
    pub fn binary_search_by<F>(&self, probe: F) -> Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.core.binary_search_by(0, self.len(), probe)
    }

    /// Binary searches `index..index + count`; positions are relative to the whole list.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the list.
    pub fn binary_search_in<F>(&self, index: usize, count: usize, probe: F) -> Result<Result<usize, usize>, CollectionError>
    where
        F: FnMut(&T) -> Ordering,
    {
        check_range(index, count, self.len())?;
        Ok(self.core.binary_search_by(index, count, probe))
    }
}

impl<T: PartialEq> PersistentTreeList<T> {
    /// Returns the index of the first element equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.core.position(0, self.len(), |element| element == value)
    }

    /// Returns `true` if the list contains an element equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }
}

impl<T: Ord> PersistentTreeList<T> {
    /// Binary searches a sorted list for `value`.
    ///
    /// # Errors
    ///
    /// `Err(index)` is the position where `value` could be inserted while
    /// keeping the list sorted.
    pub fn binary_search(&self, value: &T) -> Result<usize, usize> {
        self.binary_search_by(|element| element.cmp(value))
    }
}

impl<T: Clone> PersistentTreeList<T> {
    /// Runs `edit` against a one-shot builder and freezes the result.
    fn edited<F>(&self, edit: F) -> Self
    where
        F: FnOnce(&mut TreeListBuilder<T>),
    {
        let mut builder = self.to_builder();
        edit(&mut builder);
        builder.to_immutable()
    }

    /// Returns a list with `value` appended.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::persistent::PersistentTreeList;
    ///
    /// let empty = PersistentTreeList::new();
    /// let one = empty.push_back(1);
    /// assert_eq!(empty.len(), 0);
    /// assert_eq!(one.get(0), Some(&1));
    /// ```
    #[must_use]
    pub fn push_back(&self, value: T) -> Self {
        self.edited(|builder| builder.push_back(value))
    }

    /// Returns a list with every element of `values` appended, in one batch.
    #[must_use]
    pub fn add_range<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.edited(|builder| builder.extend(values))
    }

    /// Returns a list with `value` inserted at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index > len()`.
    pub fn insert(&self, index: usize, value: T) -> Result<Self, CollectionError> {
        let mut builder = self.to_builder();
        builder.insert(index, value)?;
        Ok(builder.to_immutable())
    }

    /// Returns a list with `values` inserted at `index`, in one batch.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index > len()`.
    pub fn insert_range<I>(&self, index: usize, values: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut builder = self.to_builder();
        builder.insert_range(index, values)?;
        Ok(builder.to_immutable())
    }

    /// Returns a list with the element at `index` replaced by `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    pub fn set_item(&self, index: usize, value: T) -> Result<Self, CollectionError> {
        let mut builder = self.to_builder();
        builder.set(index, value)?;
        Ok(builder.to_immutable())
    }

    /// Returns a list without the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    pub fn remove_at(&self, index: usize) -> Result<Self, CollectionError> {
        let mut builder = self.to_builder();
        builder.remove_at(index)?;
        Ok(builder.to_immutable())
    }

    /// Returns a list without the first element for which `equals(element, value)`
    /// holds, or a list sharing this one's tree if there is none.
    #[must_use]
    pub fn remove_by<F>(&self, value: &T, mut equals: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.core
            .position(0, self.len(), |element| equals(element, value))
            .and_then(|index| self.remove_at(index).ok())
            .unwrap_or_else(|| self.clone())
    }

    /// Returns a list without every element matching `predicate`, in one batch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::persistent::PersistentTreeList;
    ///
    /// let list: PersistentTreeList<i32> = (0..10).collect();
    /// let odd = list.remove_all(|value| value % 2 == 0);
    /// assert_eq!(odd.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7, 9]);
    /// ```
    #[must_use]
    pub fn remove_all<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let mut builder = self.to_builder();
        if builder.remove_all(predicate) == 0 {
            return self.clone();
        }
        builder.to_immutable()
    }

    /// Returns a list without the `count` elements starting at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the list.
    pub fn remove_range(&self, index: usize, count: usize) -> Result<Self, CollectionError> {
        let mut builder = self.to_builder();
        builder.remove_range(index, count)?;
        Ok(builder.to_immutable())
    }

    /// Returns a new list holding the `count` elements starting at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the list.
    pub fn get_range(&self, index: usize, count: usize) -> Result<Self, CollectionError> {
        check_range(index, count, self.len())?;
        let mut builder = TreeListBuilder::with_branching_factor(self.branching_factor());
        builder.extend(self.core.iter_from(index).take(count).cloned());
        Ok(builder.to_immutable())
    }

    /// Returns an empty list with the same branching factor.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::with_branching_factor(self.branching_factor())
    }

    /// Returns a list with the elements stably sorted by `compare`.
    ///
    /// # Complexity
    ///
    /// O(N log N)
    #[must_use]
    pub fn sort_by<F>(&self, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut elements: Vec<T> = self.iter().cloned().collect();
        elements.sort_by(compare);
        let mut builder = TreeListBuilder::with_branching_factor(self.branching_factor());
        builder.extend(elements);
        builder.to_immutable()
    }

    /// Clones the whole list into `destination` starting at `destination_index`.
    ///
    /// # Errors
    ///
    /// See [`TreeList::copy_to`](crate::tree::TreeList::copy_to).
    pub fn copy_to(&self, destination: Option<&mut [T]>, destination_index: isize) -> Result<(), CollectionError> {
        self.core.copy_range_to(0, destination, destination_index, self.len())
    }

    /// Clones `count` elements starting at `source_index` into `destination`.
    ///
    /// # Errors
    ///
    /// See [`TreeList::copy_range_to`](crate::tree::TreeList::copy_range_to).
    pub fn copy_range_to(
        &self,
        source_index: usize,
        destination: Option<&mut [T]>,
        destination_index: isize,
        count: usize,
    ) -> Result<(), CollectionError> {
        self.core.copy_range_to(source_index, destination, destination_index, count)
    }
}

impl<T: Clone + PartialEq> PersistentTreeList<T> {
    /// Returns a list without the first element equal to `value`.
    #[must_use]
    pub fn remove(&self, value: &T) -> Self {
        self.remove_by(value, PartialEq::eq)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Clone for PersistentTreeList<T> {
    /// O(1): the clone shares the whole tree.
    fn clone(&self) -> Self {
        Self::from_core(self.core.clone())
    }
}

impl<T> Default for PersistentTreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for PersistentTreeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && (self.core.shares_root_with(&other.core) || self.iter().eq(other.iter()))
    }
}

impl<T: Eq> Eq for PersistentTreeList<T> {}

impl<T: fmt::Debug> fmt::Debug for PersistentTreeList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> FromIterator<T> for PersistentTreeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = TreeListBuilder::new();
        builder.extend(iter);
        builder.to_immutable()
    }
}

impl<'a, T> IntoIterator for &'a PersistentTreeList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::validate::validate;
    use rstest::rstest;

    fn small(values: impl IntoIterator<Item = i32>) -> PersistentTreeList<i32> {
        PersistentTreeList::with_branching_factor(BranchingFactor::new(4).unwrap()).add_range(values)
    }

    #[rstest]
    fn test_single_edits_leave_source_intact() {
        let source = small(0..50);
        let inserted = source.insert(25, -1).unwrap();
        let removed = source.remove_at(0).unwrap();
        let replaced = source.set_item(49, -49).unwrap();

        assert_eq!(source, small(0..50));
        assert_eq!(inserted.get(25), Some(&-1));
        assert_eq!(removed.get(0), Some(&1));
        assert_eq!(replaced.get(49), Some(&-49));
        for list in [&source, &inserted, &removed, &replaced] {
            validate(list.core());
        }
    }

    #[rstest]
    fn test_no_op_removals_share_the_tree() {
        let source = small(0..10);
        assert!(source.remove(&100).core().shares_root_with(source.core()));
        assert!(source.remove_all(|value| *value > 100).core().shares_root_with(source.core()));
    }

    #[rstest]
    fn test_get_range_copies_window() {
        let source = small(0..30);
        let window = source.get_range(10, 5).unwrap();
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![10, 11, 12, 13, 14]);
        assert!(source.get_range(28, 3).is_err());
    }

    #[rstest]
    fn test_sort_by_is_stable() {
        let source: PersistentTreeList<(i32, char)> =
            [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')].into_iter().collect();
        let sorted = source.sort_by(|left, right| left.0.cmp(&right.0));
        assert_eq!(
            sorted.iter().copied().collect::<Vec<_>>(),
            vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]
        );
    }

    #[rstest]
    fn test_clear_keeps_branching_factor() {
        let source = small(0..10);
        let cleared = source.clear();
        assert!(cleared.is_empty());
        assert_eq!(cleared.branching_factor(), source.branching_factor());
    }
}
