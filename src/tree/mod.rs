//! Balanced multi-way tree engine.
//!
//! This module provides the paged tree that every collection in the crate is
//! built on, and [`TreeList`], a mutable list with O(log N) indexed insertion
//! and removal at arbitrary positions.
//!
//! # Structure
//!
//! The tree has two kinds of pages:
//!
//! - **Leaf** pages hold up to `B` elements directly.
//! - **Branch** pages hold up to `B` children together with a parallel offset
//!   array, where `offsets[i]` is the number of elements stored before child
//!   `i`. Locating the child that holds a global index is a binary search over
//!   that array.
//!
//! All leaves sit at the same depth. Height only ever changes at the root: a
//! root that splits is promoted under a new branch, and a root branch left
//! with a single child collapses into that child.
//!
//! # Examples
//!
//! ```rust
//! use treelist::tree::TreeList;
//!
//! let mut list: TreeList<i32> = (0..1000).collect();
//! list.insert(500, -1).unwrap();
//! assert_eq!(list.get(500), Some(&-1));
//! assert_eq!(list.get(501), Some(&500));
//!
//! assert_eq!(list.remove_at(0).unwrap(), 0);
//! assert_eq!(list.len(), 1000);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, which allows
/// persistent snapshots to be read from many threads at once.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod branch;
mod engine;
mod iter;
mod leaf;
mod list;
mod node;
#[cfg(test)]
pub(crate) mod validate;

pub(crate) use engine::TreeCore;
pub(crate) use node::OwnerToken;

pub use iter::Iter;
pub use list::TreeList;
pub use list::TreeListCursor;

use crate::error::CollectionError;

// =============================================================================
// Branching Factor
// =============================================================================

/// Maximum number of elements per leaf page and children per branch page.
///
/// A page other than the root never holds fewer than `⌈B/2⌉` entries once an
/// edit has finished, except for pages on the right spine of the tree, which
/// the append fast path fills left to right.
///
/// # Examples
///
/// ```rust
/// use treelist::tree::BranchingFactor;
///
/// let factor = BranchingFactor::new(8).unwrap();
/// assert_eq!(factor.get(), 8);
/// assert_eq!(factor.minimum_occupancy(), 4);
///
/// assert!(BranchingFactor::new(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchingFactor(usize);

impl BranchingFactor {
    /// The smallest branching factor accepted.
    pub const MINIMUM: usize = 4;

    /// The branching factor used by `new()` constructors.
    pub const DEFAULT: Self = Self(32);

    /// Creates a branching factor, rejecting values below [`Self::MINIMUM`].
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ArgumentOutOfRange`] when `value < 4`.
    pub fn new(value: usize) -> Result<Self, CollectionError> {
        if value < Self::MINIMUM {
            return Err(CollectionError::out_of_range(
                "branching_factor",
                value,
                Self::MINIMUM,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw branching factor.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns `⌈B/2⌉`, the fewest entries a non-root page may settle at.
    #[inline]
    #[must_use]
    pub const fn minimum_occupancy(self) -> usize {
        self.0.div_ceil(2)
    }
}

impl Default for BranchingFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}
