//! Ordering strategies for the sorted collections.

use std::cmp::Ordering;

use crate::tree::ReferenceCounter;

// =============================================================================
// Thread Safety Bound
// =============================================================================

/// Extra bounds a comparer must satisfy to be stored in a collection.
///
/// With the `arc` feature this is `Send + Sync`, so sorted collections stay
/// shareable across threads. Otherwise it places no requirement.
#[cfg(feature = "arc")]
pub trait ThreadSafety: Send + Sync {}

#[cfg(feature = "arc")]
impl<T: Send + Sync + ?Sized> ThreadSafety for T {}

/// Extra bounds a comparer must satisfy to be stored in a collection.
///
/// With the `arc` feature this is `Send + Sync`, so sorted collections stay
/// shareable across threads. Otherwise it places no requirement.
#[cfg(not(feature = "arc"))]
pub trait ThreadSafety {}

#[cfg(not(feature = "arc"))]
impl<T: ?Sized> ThreadSafety for T {}

// =============================================================================
// Comparer
// =============================================================================

/// A total order over `T` used to keep a collection sorted.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparer.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use treelist::sorted::{Comparer, NaturalOrder};
///
/// let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
/// assert_eq!(by_length.compare(&"abc", &"de"), Ordering::Greater);
/// assert_eq!(NaturalOrder.compare(&"abc", &"de"), Ordering::Less);
/// ```
pub trait Comparer<T>: ThreadSafety {
    /// Orders `left` relative to `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Returns `true` if this comparer is the stateless [`NaturalOrder`].
    ///
    /// Every `NaturalOrder` instance orders identically, so two collections
    /// using it are treated as sharing one comparer even when they hold
    /// different handles.
    fn is_natural_order(&self) -> bool {
        false
    }
}

impl<T, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering + ThreadSafety,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// The order given by `T`'s [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord> Comparer<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }

    fn is_natural_order(&self) -> bool {
        true
    }
}

// =============================================================================
// Shared Handles
// =============================================================================

/// Reference-counted handle to a comparer, shared by every version of a collection.
#[cfg(feature = "arc")]
pub type SharedComparer<T> = std::sync::Arc<dyn Comparer<T>>;

/// Reference-counted handle to a comparer, shared by every version of a collection.
#[cfg(not(feature = "arc"))]
pub type SharedComparer<T> = std::rc::Rc<dyn Comparer<T>>;

/// Wraps `comparer` in a [`SharedComparer`].
///
/// # Examples
///
/// ```rust
/// use treelist::sorted::{SortedTreeList, shared};
///
/// let descending = shared(|left: &i32, right: &i32| right.cmp(left));
/// let list = SortedTreeList::by_comparer(descending).add(1).add(3).add(2);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
/// ```
pub fn shared<T, C>(comparer: C) -> SharedComparer<T>
where
    C: Comparer<T> + 'static,
{
    let handle: SharedComparer<T> = ReferenceCounter::new(comparer);
    handle
}

/// Returns a fresh handle to [`NaturalOrder`].
#[must_use]
pub fn natural_order<T: Ord + 'static>() -> SharedComparer<T> {
    shared(NaturalOrder)
}

/// Returns `true` when two handles are known to order identically.
///
/// This is an identity test: two distinct closures with the same behavior
/// are *not* recognized as equal. The only exception is [`NaturalOrder`].
pub(crate) fn same_comparer<T>(left: &SharedComparer<T>, right: &SharedComparer<T>) -> bool {
    SharedComparer::ptr_eq(left, right) || (left.is_natural_order() && right.is_natural_order())
}
