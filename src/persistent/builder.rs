//! Ownership-tracked builder for [`PersistentTreeList`].

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use super::list::PersistentTreeList;
use crate::error::{CollectionError, check_element, check_position, check_range};
use crate::tree::{BranchingFactor, Iter, OwnerToken, TreeCore};

// =============================================================================
// TreeListBuilder Definition
// =============================================================================

/// A mutable staging area over the pages of a [`PersistentTreeList`].
///
/// The builder starts out sharing every page with the snapshot it came from.
/// The first edit that reaches a shared page copies it (along with the path
/// from the root) and tags the copy as owned by this builder; later edits
/// reaching an owned page change it in place. A batch of `k` edits therefore
/// copies each touched page once instead of once per edit.
///
/// [`to_immutable`](Self::to_immutable) publishes the current tree in O(1)
/// and hands the builder a new identity, so every page the snapshot can see
/// is treated as shared from then on. Edits made after a freeze are never
/// visible through the snapshot it returned.
///
/// # Design
///
/// - `PhantomData<Rc<()>>` makes the builder `!Send` and `!Sync`
/// - Clone is intentionally not implemented (one editor per builder)
///
/// # Examples
///
/// ```rust
/// use treelist::persistent::PersistentTreeList;
///
/// let original: PersistentTreeList<i32> = (0..5).collect();
///
/// let mut builder = original.to_builder();
/// builder.push_back(5);
/// builder.insert(0, -1).unwrap();
/// builder.remove_at(3).unwrap();
///
/// let first = builder.to_immutable();
/// builder.set(0, 100).unwrap();
/// let second = builder.to_immutable();
///
/// assert_eq!(original.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
/// assert_eq!(first.iter().copied().collect::<Vec<_>>(), vec![-1, 0, 1, 3, 4, 5]);
/// assert_eq!(second.get(0), Some(&100));
/// ```
pub struct TreeListBuilder<T> {
    core: TreeCore<T>,
    owner: OwnerToken,
    /// Marker to ensure `!Send` and `!Sync`.
    _marker: PhantomData<Rc<()>>,
}

static_assertions::assert_not_impl_any!(TreeListBuilder<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(TreeListBuilder<String>: Send, Sync);

#[cfg(feature = "arc")]
mod arc_send_sync_verification_builder {
    use super::TreeListBuilder;
    use std::sync::Arc;

    static_assertions::assert_not_impl_any!(TreeListBuilder<Arc<i32>>: Send, Sync);
}

impl<T> TreeListBuilder<T> {
    /// Creates a builder whose working tree is `core`, still shared with its source.
    pub(crate) fn from_core(core: TreeCore<T>) -> Self {
        Self {
            core,
            owner: OwnerToken::fresh(),
            _marker: PhantomData,
        }
    }

    /// Creates a builder over an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::with_branching_factor(BranchingFactor::DEFAULT)
    }

    /// Creates a builder over an empty tree with the given page capacity.
    #[must_use]
    pub fn with_branching_factor(branching_factor: BranchingFactor) -> Self {
        Self::from_core(TreeCore::new(branching_factor, OwnerToken::SHARED))
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns `true` if the builder holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Returns the element at `index`, or `None` if out of bounds.
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

    /// Returns the index of the first element in `index..index + count` for
    /// which `equals(element, value)` holds.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the builder.
    pub fn index_of_by<F>(&self, value: &T, index: usize, count: usize, mut equals: F) -> Result<Option<usize>, CollectionError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        check_range(index, count, self.len())?;
        Ok(self.core.position(index, count, |element| equals(element, value)))
    }

    /// Binary searches the working tree, as [`slice::binary_search_by`] does.
    ///
    /// # Errors
    ///
    /// `Err(index)` is the position where a matching element could be inserted.
    pub fn binary_search_by<F>(&self, probe: F) -> Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.core.binary_search_by(0, self.len(), probe)
    }

    /// Publishes the working tree as an immutable snapshot.
    ///
    /// Every page reachable from the snapshot becomes shared: the builder
    /// keeps working on the same pages but copies each of them before its
    /// next write.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn to_immutable(&mut self) -> PersistentTreeList<T> {
        let snapshot = PersistentTreeList::from_core(self.core.clone());
        self.owner = OwnerToken::fresh();
        log::trace!("froze builder with {} elements", snapshot.len());
        snapshot
    }

    pub(crate) const fn core(&self) -> &TreeCore<T> {
        &self.core
    }
}

impl<T: PartialEq> TreeListBuilder<T> {
    /// Returns the index of the first element equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.core.position(0, self.len(), |element| element == value)
    }

    /// Returns `true` if the builder contains an element equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }
}

impl<T: Clone> TreeListBuilder<T> {
    /// Replaces the element at `index`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        check_element("index", index, self.len())?;
        Ok(self.core.set(self.owner, index, value))
    }

    /// Appends `value`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    pub fn push_back(&mut self, value: T) {
        self.core.insert(self.owner, self.len(), value);
    }

    /// Inserts `value` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        check_position("index", index, self.len())?;
        self.core.insert(self.owner, index, value);
        Ok(())
    }

    /// Inserts every element of `values` starting at `index`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index > len()`.
    pub fn insert_range<I>(&mut self, index: usize, values: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        check_position("index", index, self.len())?;
        for (offset, value) in values.into_iter().enumerate() {
            self.core.insert(self.owner, index + offset, value);
        }
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        check_element("index", index, self.len())?;
        Ok(self.core.remove_at(self.owner, index))
    }

    /// Removes `count` elements starting at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error when `index..index + count` is not a range of the builder.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), CollectionError> {
        check_range(index, count, self.len())?;
        if count == self.len() {
            self.clear();
            return Ok(());
        }
        for _ in 0..count {
            self.core.remove_at(self.owner, index);
        }
        Ok(())
    }

    /// Removes every element matching `predicate`, returning how many were removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use treelist::persistent::TreeListBuilder;
    ///
    /// let mut builder: TreeListBuilder<i32> = TreeListBuilder::new();
    /// builder.extend(0..10);
    /// assert_eq!(builder.remove_all(|value| value % 3 == 0), 4);
    /// assert_eq!(builder.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4, 5, 7, 8]);
    /// ```
    pub fn remove_all<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let positions: Vec<usize> = self
            .iter()
            .enumerate()
            .filter_map(|(index, element)| predicate(element).then_some(index))
            .collect();
        for &index in positions.iter().rev() {
            self.core.remove_at(self.owner, index);
        }
        positions.len()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.core.clear(self.owner);
    }

    /// Clones the whole working tree into `destination` starting at `destination_index`.
    ///
    /// # Errors
    ///
    /// See [`TreeList::copy_to`](crate::tree::TreeList::copy_to).
    pub fn copy_to(&self, destination: Option<&mut [T]>, destination_index: isize) -> Result<(), CollectionError> {
        self.core.copy_range_to(0, destination, destination_index, self.len())
    }
}

impl<T> Default for TreeListBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Extend<T> for TreeListBuilder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: Clone> FromIterator<T> for TreeListBuilder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeListBuilder<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a TreeListBuilder<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
