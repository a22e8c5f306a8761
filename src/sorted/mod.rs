//! Sorted overlays on the persistent tree list.
//!
//! Every collection here keeps its elements ordered by a [`Comparer`] and
//! stores them in a [`PersistentTreeList`](crate::persistent::PersistentTreeList),
//! so positional access stays O(log N) and iteration is always in order:
//!
//! - [`SortedTreeList`]: Sorted multiset; equal elements keep insertion order
//! - [`SortedTreeSet`]: Sorted set with merge-based set algebra
//! - [`SortedTreeDictionary`]: Map whose entries are sorted by key
//!
//! Each immutable collection has a builder counterpart that edits in place
//! and freezes in O(1).
//!
//! # Comparers
//!
//! A comparer is shared through [`SharedComparer`]. Two collections are
//! considered to use the same order when they hold the same handle, or when
//! both use [`NaturalOrder`]. Set operations between collections ordered
//! differently re-sort the other operand first.
//!
//! # Examples
//!
//! ```rust
//! use treelist::sorted::{SortedTreeSet, shared};
//!
//! let by_length = shared(|left: &&str, right: &&str| left.len().cmp(&right.len()));
//! let words = SortedTreeSet::by_comparer(by_length)
//!     .add("pear")
//!     .add("fig")
//!     .add("banana")
//!     .add("plum"); // same length as "pear": already present
//!
//! assert_eq!(words.iter().copied().collect::<Vec<_>>(), vec!["fig", "pear", "banana"]);
//! ```

mod builder;
mod comparer;
mod dictionary;
mod list;
mod merge;
mod search;
mod set;

pub use builder::SortedTreeListBuilder;
pub use comparer::{Comparer, NaturalOrder, SharedComparer, ThreadSafety, natural_order, shared};
pub use dictionary::{Entries, SortedTreeDictionary};
pub use list::SortedTreeList;
pub use search::{SearchOutcome, TieBreak, insertion_point};
pub use set::{SortedTreeSet, SortedTreeSetBuilder};

#[cfg(feature = "arc")]
mod arc_send_sync_verification {
    use super::{SortedTreeDictionary, SortedTreeList, SortedTreeSet};

    static_assertions::assert_impl_all!(SortedTreeList<i32>: Send, Sync);
    static_assertions::assert_impl_all!(SortedTreeSet<String>: Send, Sync);
    static_assertions::assert_impl_all!(SortedTreeDictionary<String, i32>: Send, Sync);
}
