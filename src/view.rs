//! A narrow list-shaped interface shared by every collection in the crate.
//!
//! [`IndexedList`] lets code that only needs positional access work against
//! any of the tree collections. The mutable types ([`TreeList`],
//! [`TreeListBuilder`]) implement its mutators; the immutable and sorted types
//! implement it read-only and refuse positional mutation with
//! [`CollectionError::NotSupported`], since an edit in place would either break
//! a snapshot's immutability or a sorted collection's order.
//!
//! # Examples
//!
//! ```rust
//! use treelist::error::CollectionError;
//! use treelist::persistent::PersistentTreeList;
//! use treelist::tree::TreeList;
//! use treelist::view::IndexedList;
//!
//! fn bump_first<L: IndexedList<i32>>(list: &mut L) -> Result<i32, CollectionError> {
//!     let first = *list.get(0).ok_or(CollectionError::NullArgument { parameter: "list" })?;
//!     list.try_set(0, first + 1)
//! }
//!
//! let mut mutable: TreeList<i32> = (0..3).collect();
//! assert_eq!(bump_first(&mut mutable), Ok(0));
//! assert_eq!(mutable.get(0), Some(&1));
//!
//! let mut snapshot: PersistentTreeList<i32> = (0..3).collect();
//! assert!(matches!(bump_first(&mut snapshot), Err(CollectionError::NotSupported { .. })));
//! ```

use crate::error::CollectionError;
use crate::persistent::{PersistentTreeList, TreeListBuilder};
use crate::sorted::{SortedTreeList, SortedTreeListBuilder, SortedTreeSet};
use crate::tree::TreeList;

// =============================================================================
// IndexedList Trait
// =============================================================================

/// Positional access with fallible mutation.
///
/// Mutators return [`CollectionError::NotSupported`] on collections that
/// cannot be edited by position, and the usual range errors otherwise.
pub trait IndexedList<T> {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<&T>;

    /// Inserts `value` at `index`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotSupported`] on read-only collections,
    /// [`CollectionError::ArgumentOutOfRange`] when `index > len()`.
    fn try_insert(&mut self, index: usize, value: T) -> Result<(), CollectionError>;

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotSupported`] on read-only collections,
    /// [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    fn try_remove_at(&mut self, index: usize) -> Result<T, CollectionError>;

    /// Replaces the element at `index`, returning the previous value.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotSupported`] on read-only collections,
    /// [`CollectionError::ArgumentOutOfRange`] when `index >= len()`.
    fn try_set(&mut self, index: usize, value: T) -> Result<T, CollectionError>;
}

const fn refuse<R>(operation: &'static str) -> Result<R, CollectionError> {
    Err(CollectionError::NotSupported { operation })
}

// =============================================================================
// Mutable Implementations
// =============================================================================

impl<T: Clone> IndexedList<T> for TreeList<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        Self::get(self, index)
    }

    fn try_insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        self.insert(index, value)
    }

    fn try_remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        self.remove_at(index)
    }

    fn try_set(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        self.set(index, value)
    }
}

impl<T: Clone> IndexedList<T> for TreeListBuilder<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        Self::get(self, index)
    }

    fn try_insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        self.insert(index, value)
    }

    fn try_remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        self.remove_at(index)
    }

    fn try_set(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        self.set(index, value)
    }
}

impl<T: Clone> IndexedList<T> for SortedTreeListBuilder<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        Self::get(self, index)
    }

    fn try_insert(&mut self, _index: usize, _value: T) -> Result<(), CollectionError> {
        refuse("insert")
    }

    fn try_remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        self.remove_at(index)
    }

    fn try_set(&mut self, _index: usize, _value: T) -> Result<T, CollectionError> {
        refuse("set")
    }
}

// =============================================================================
// Read-only Implementations
// =============================================================================

macro_rules! read_only_indexed_list {
    ($($collection:ident),+ $(,)?) => {
        $(
            impl<T> IndexedList<T> for $collection<T> {
                fn len(&self) -> usize {
                    Self::len(self)
                }

                fn get(&self, index: usize) -> Option<&T> {
                    Self::get(self, index)
                }

                fn try_insert(&mut self, _index: usize, _value: T) -> Result<(), CollectionError> {
                    refuse("insert")
                }

                fn try_remove_at(&mut self, _index: usize) -> Result<T, CollectionError> {
                    refuse("remove_at")
                }

                fn try_set(&mut self, _index: usize, _value: T) -> Result<T, CollectionError> {
                    refuse("set")
                }
            }
        )+
    };
}

read_only_indexed_list!(PersistentTreeList, SortedTreeList, SortedTreeSet);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn drain<L: IndexedList<i32>>(list: &mut L) -> Result<Vec<i32>, CollectionError> {
        let mut drained = Vec::new();
        while !list.is_empty() {
            drained.push(list.try_remove_at(0)?);
        }
        Ok(drained)
    }

    fn not_supported<R: std::fmt::Debug>(result: Result<R, CollectionError>) -> bool {
        matches!(result, Err(CollectionError::NotSupported { .. }))
    }

    #[rstest]
    fn test_tree_list_supports_every_mutator() {
        let mut list: TreeList<i32> = (0..3).collect();
        IndexedList::try_insert(&mut list, 0, -1).unwrap();
        assert_eq!(IndexedList::try_set(&mut list, 1, 10), Ok(0));
        assert_eq!(drain(&mut list), Ok(vec![-1, 10, 1, 2]));
    }

    #[rstest]
    fn test_builder_supports_every_mutator() {
        let mut builder: TreeListBuilder<i32> = (0..3).collect();
        IndexedList::try_insert(&mut builder, 3, 3).unwrap();
        assert!(matches!(
            IndexedList::try_set(&mut builder, 4, 0),
            Err(CollectionError::ArgumentOutOfRange { .. })
        ));
        assert_eq!(drain(&mut builder), Ok(vec![0, 1, 2, 3]));
    }

    #[rstest]
    fn test_read_only_collections_refuse_mutation() {
        let mut persistent: PersistentTreeList<i32> = (0..3).collect();
        let mut sorted: SortedTreeList<i32> = (0..3).collect();
        let mut set: SortedTreeSet<i32> = (0..3).collect();

        assert!(not_supported(IndexedList::try_insert(&mut persistent, 0, 1)));
        assert!(not_supported(IndexedList::try_remove_at(&mut sorted, 0)));
        assert!(not_supported(IndexedList::try_set(&mut set, 0, 1)));

        assert_eq!(IndexedList::len(&persistent), 3);
        assert_eq!(IndexedList::get(&sorted, 2), Some(&2));
        assert_eq!(IndexedList::get(&set, 3), None);
    }

    #[rstest]
    fn test_sorted_builder_allows_removal_only() {
        let mut builder = SortedTreeList::new().add(2).add(1).to_builder();
        assert!(not_supported(IndexedList::try_insert(&mut builder, 0, 5)));
        assert!(not_supported(IndexedList::try_set(&mut builder, 0, 5)));
        assert_eq!(drain(&mut builder), Ok(vec![1, 2]));
    }
}
