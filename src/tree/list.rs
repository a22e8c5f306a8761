//! The mutable indexed list.

use std::cmp::Ordering;
use std::fmt;

use super::iter::Iter;
use super::{BranchingFactor, OwnerToken, TreeCore};
use crate::error::{CollectionError, check_element, check_position, check_range};

// =============================================================================
// TreeList Definition
// =============================================================================

/// A mutable list with O(log N) indexed access, insertion and removal.
///
/// Elements live in the leaves of a balanced multi-way tree, so inserting or
/// removing in the middle of a large list only moves a single page's worth
/// of elements instead of shifting the whole tail as a `Vec` would.
///
/// Every structural change (insertion, removal, clearing) bumps a version
/// counter that [`TreeListCursor`] checks on every step.
///
/// # Examples
///
/// ```rust
/// use treelist::tree::TreeList;
///
/// let mut list = TreeList::new();
/// list.push(1);
/// list.push(3);
/// list.insert(1, 2).unwrap();
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert_eq!(list.remove_at(0), Ok(1));
/// assert_eq!(list.len(), 2);
/// ```
pub struct TreeList<T> {
    core: TreeCore<T>,
    owner: OwnerToken,
    version: u64,
}

impl<T> TreeList<T> {
    /// Creates an empty list with the default branching factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::tree::TreeList;
    ///
    /// let list: TreeList<i32> = TreeList::new();
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_branching_factor(BranchingFactor::DEFAULT)
    }

    /// Creates an empty list whose pages hold up to `branching_factor` entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::tree::{BranchingFactor, TreeList};
    ///
    /// let factor = BranchingFactor::new(4).unwrap();
    /// let list: TreeList<i32> = TreeList::with_branching_factor(factor);
    /// assert_eq!(list.branching_factor(), factor);
    /// ```
    #[must_use]
    pub fn with_branching_factor(branching_factor: BranchingFactor) -> Self {
        let owner = OwnerToken::fresh();
        Self {
            core: TreeCore::new(branching_factor, owner),
            owner,
            version: 0,
        }
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

    /// Returns the branching factor the list was created with.
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

    /// Returns an iterator starting at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index > len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::tree::TreeList;
    ///
    /// let list: TreeList<i32> = (0..10).collect();
    /// let tail: Vec<i32> = list.iter_from(7).unwrap().copied().collect();
    /// assert_eq!(tail, vec![7, 8, 9]);
    /// ```
    pub fn iter_from(&self, index: usize) -> Result<Iter<'_, T>, CollectionError> {
        check_position("index", index, self.len())?;
        Ok(self.core.iter_from(index))
    }

    /// Returns a detached cursor positioned before the first element.
    ///
    /// See [`TreeListCursor`] for how it detects concurrent modification.
    #[must_use]
    pub const fn cursor(&self) -> TreeListCursor {
        TreeListCursor {
            owner: self.owner,
            version: self.version,
            position: 0,
        }
    }

    /// Returns the index of the first element in `index..index + count` for
    /// which `equals(element, value)` holds.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the list.
    ///
    /// # Complexity
    ///
    /// O(count)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::tree::TreeList;
    ///
    /// let list: TreeList<&str> = ["a", "B", "c", "b"].into_iter().collect();
    /// let found = list.index_of_by(&"b", 0, 4, |left, right| left.eq_ignore_ascii_case(right));
    /// assert_eq!(found, Ok(Some(1)));
    /// ```
    pub fn index_of_by<F>(&self, value: &T, index: usize, count: usize, mut equals: F) -> Result<Option<usize>, CollectionError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        check_range(index, count, self.len())?;
        Ok(self.core.position(index, count, |element| equals(element, value)))
    }

    /// Binary searches the whole list with a probe ordering each element
    /// against the target, as [`slice::binary_search_by`] does.
    ///
    /// The list must be sorted consistently with `probe`.
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

    /// Binary searches `index..index + count`.
    ///
    /// The inner result follows the [`slice::binary_search_by`] contract with
    /// positions relative to the whole list.
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

impl<T: PartialEq> TreeList<T> {
    /// Returns the index of the first element equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(N)
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

impl<T: Ord> TreeList<T> {
    /// Binary searches a sorted list for `value`.
    ///
    /// # Errors
    ///
    /// `Err(index)` is the position where `value` could be inserted while
    /// keeping the list sorted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::tree::TreeList;
    ///
    /// let list: TreeList<i32> = [1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(list.binary_search(&5), Ok(2));
    /// assert_eq!(list.binary_search(&4), Err(2));
    /// ```
    pub fn binary_search(&self, value: &T) -> Result<usize, usize> {
        self.binary_search_by(|element| element.cmp(value))
    }
}

impl<T: Clone> TreeList<T> {
    /// Replaces the element at `index`, returning the previous value.
    ///
    /// Replacing an element is not a structural change and does not
    /// invalidate cursors.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        check_element("index", index, self.len())?;
        Ok(self.core.set(self.owner, index, value))
    }

    /// Appends `value` to the end of the list.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn push(&mut self, value: T) {
        self.core.insert(self.owner, self.len(), value);
        self.version += 1;
    }

    /// Inserts `value` at `index`, shifting later elements up by one.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index > len()`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        check_position("index", index, self.len())?;
        self.core.insert(self.owner, index, value);
        self.version += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        check_element("index", index, self.len())?;
        let value = self.core.remove_at(self.owner, index);
        self.version += 1;
        Ok(value)
    }

    /// Removes `count` elements starting at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the list.
    ///
    /// # Complexity
    ///
    /// O(count * log N)
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), CollectionError> {
        check_range(index, count, self.len())?;
        if count == self.len() {
            self.clear();
            return Ok(());
        }
        for _ in 0..count {
            self.core.remove_at(self.owner, index);
        }
        self.version += 1;
        Ok(())
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.core.clear(self.owner);
        self.version += 1;
    }

    /// Clones the whole list into `destination` starting at `destination_index`.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::NullArgument`] when `destination` is `None`.
    /// - [`CollectionError::ArgumentOutOfRange`] when `destination_index` is negative.
    /// - [`CollectionError::InvalidArgument`] when fewer than `len()` slots remain
    ///   from `destination_index`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::tree::TreeList;
    ///
    /// let list: TreeList<i32> = (1..=3).collect();
    /// let mut destination = [0; 5];
    /// list.copy_to(Some(&mut destination), 1).unwrap();
    /// assert_eq!(destination, [0, 1, 2, 3, 0]);
    ///
    /// assert!(list.copy_to(Some(&mut destination), 3).is_err());
    /// ```
    pub fn copy_to(&self, destination: Option<&mut [T]>, destination_index: isize) -> Result<(), CollectionError> {
        self.core.copy_range_to(0, destination, destination_index, self.len())
    }

    /// Clones `count` elements starting at `source_index` into `destination`.
    ///
    /// # Errors
    ///
    /// As [`copy_to`](Self::copy_to); additionally the source range must lie
    /// within the list.
    pub fn copy_range_to(
        &self,
        source_index: usize,
        destination: Option<&mut [T]>,
        destination_index: isize,
        count: usize,
    ) -> Result<(), CollectionError> {
        self.core.copy_range_to(source_index, destination, destination_index, count)
    }

    #[cfg(test)]
    pub(crate) const fn core(&self) -> &TreeCore<T> {
        &self.core
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A forward cursor that does not borrow the list it walks.
///
/// The cursor records the list's version when it is created. Each call to
/// [`advance`](Self::advance) fails with [`CollectionError::CollectionModified`]
/// if the list has been structurally changed since, instead of returning an
/// element from a shifted position. [`reset`](Self::reset) resynchronizes it.
///
/// # Examples
///
/// ```rust
/// use treelist::error::CollectionError;
/// use treelist::tree::TreeList;
///
/// let mut list: TreeList<i32> = (0..3).collect();
/// let mut cursor = list.cursor();
/// assert_eq!(cursor.advance(&list), Ok(Some(&0)));
///
/// list.push(3);
/// assert_eq!(cursor.advance(&list), Err(CollectionError::CollectionModified));
///
/// cursor.reset(&list);
/// assert_eq!(cursor.advance(&list), Ok(Some(&0)));
/// ```
#[derive(Debug, Clone)]
pub struct TreeListCursor {
    owner: OwnerToken,
    version: u64,
    position: usize,
}

impl TreeListCursor {
    /// Returns the next element of `list`, or `None` past the end.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::CollectionModified`] if `list` changed structurally
    ///   after this cursor was created or last reset.
    /// - [`CollectionError::InvalidArgument`] if `list` is not the list that
    ///   created this cursor.
    pub fn advance<'a, T>(&mut self, list: &'a TreeList<T>) -> Result<Option<&'a T>, CollectionError> {
        if list.owner != self.owner {
            return Err(CollectionError::InvalidArgument {
                parameter: "list",
                reason: "cursor was created by a different list",
            });
        }
        if list.version != self.version {
            return Err(CollectionError::CollectionModified);
        }
        let element = list.get(self.position);
        if element.is_some() {
            self.position += 1;
        }
        Ok(element)
    }

    /// Rewinds to the first element and adopts the current version of `list`.
    pub fn reset<T>(&mut self, list: &TreeList<T>) {
        *self = list.cursor();
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Default for TreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TreeList<T> {
    /// Shares every page with `self`; each side copies pages as it edits them.
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            owner: OwnerToken::fresh(),
            version: 0,
        }
    }
}

impl<T: PartialEq> PartialEq for TreeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && (self.core.shares_root_with(&other.core) || self.iter().eq(other.iter()))
    }
}

impl<T: Eq> Eq for TreeList<T> {}

impl<T: fmt::Debug> fmt::Debug for TreeList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> FromIterator<T> for TreeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: Clone> Extend<T> for TreeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a TreeList<T> {
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

    fn small(values: impl IntoIterator<Item = i32>) -> TreeList<i32> {
        let mut list = TreeList::with_branching_factor(BranchingFactor::new(4).unwrap());
        list.extend(values);
        list
    }

    #[rstest]
    fn test_insert_in_middle_keeps_balance() {
        let mut list = small(0..50);
        for step in 0..50 {
            list.insert(25, -step).unwrap();
            validate(list.core());
        }
        assert_eq!(list.len(), 100);
        assert_eq!(list.get(25), Some(&-49));
        assert_eq!(list.get(74), Some(&0));
        assert_eq!(list.get(75), Some(&25));
    }

    #[rstest]
    fn test_remove_range_shifts_tail() {
        let mut list = small(0..30);
        list.remove_range(5, 20).unwrap();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 25, 26, 27, 28, 29]);
        validate(list.core());
    }

    #[rstest]
    fn test_invalid_indices_leave_list_untouched() {
        let mut list = small(0..5);
        assert!(list.insert(6, 0).is_err());
        assert!(list.remove_at(5).is_err());
        assert!(list.set(5, 0).is_err());
        assert!(list.remove_range(3, 3).is_err());
        assert_eq!(list, small(0..5));
    }

    #[rstest]
    fn test_clone_is_isolated_from_original() {
        let mut original = small(0..40);
        let copy = original.clone();
        original.set(0, 100).unwrap();
        original.remove_at(10).unwrap();
        assert_eq!(copy, small(0..40));
        validate(copy.core());
        validate(original.core());
    }

    #[rstest]
    fn test_cursor_rejects_foreign_list() {
        let list = small(0..3);
        let other = list.clone();
        let mut cursor = list.cursor();
        assert!(matches!(
            cursor.advance(&other),
            Err(CollectionError::InvalidArgument { .. })
        ));
    }

    #[rstest]
    fn test_cursor_survives_set() {
        let mut list = small(0..3);
        let mut cursor = list.cursor();
        list.set(1, 10).unwrap();
        assert_eq!(cursor.advance(&list), Ok(Some(&0)));
        assert_eq!(cursor.advance(&list), Ok(Some(&10)));
        assert_eq!(cursor.advance(&list), Ok(Some(&2)));
        assert_eq!(cursor.advance(&list), Ok(None));
    }

    #[rstest]
    fn test_debug_lists_elements() {
        let list = small(1..=3);
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }
}
