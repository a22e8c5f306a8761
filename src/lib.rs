//! # treelist
//!
//! Indexed lists built on a balanced multi-way tree, with persistent
//! snapshots and sorted overlays.
//!
//! ## Overview
//!
//! Every collection in this crate stores its elements in the leaves of a
//! paged tree whose branch pages record how many elements sit before each
//! child. That makes positional access, insertion and removal O(log N) at
//! any index, not just at the ends. On top of that engine the crate offers:
//!
//! - **Mutable list**: [`TreeList`](tree::TreeList), edited in place
//! - **Persistent list**: [`PersistentTreeList`](persistent::PersistentTreeList),
//!   immutable with structural sharing, and its
//!   [`TreeListBuilder`](persistent::TreeListBuilder) for batch edits
//! - **Sorted collections**: [`SortedTreeList`](sorted::SortedTreeList),
//!   [`SortedTreeSet`](sorted::SortedTreeSet) and
//!   [`SortedTreeDictionary`](sorted::SortedTreeDictionary)
//! - **Interop view**: the [`IndexedList`](view::IndexedList) trait
//!
//! ## Feature Flags
//!
//! - `arc`: Use `std::sync::Arc` for shared pages and comparers, making the
//!   immutable collections `Send + Sync`
//!
//! ## Example
//!
//! ```rust
//! use treelist::prelude::*;
//!
//! let list: PersistentTreeList<i32> = (0..1000).collect();
//! let edited = list.insert(500, -1).unwrap();
//! assert_eq!(list.get(500), Some(&500));
//! assert_eq!(edited.get(500), Some(&-1));
//!
//! let sorted: SortedTreeSet<i32> = [5, 3, 5, 1].into_iter().collect();
//! assert_eq!(sorted.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports every public collection type, the error type and the
/// [`IndexedList`](crate::view::IndexedList) trait.
///
/// # Usage
///
/// ```rust
/// use treelist::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::CollectionError;
    pub use crate::persistent::*;
    pub use crate::sorted::*;
    pub use crate::tree::*;
    pub use crate::view::*;
}

pub mod error;
pub mod persistent;
pub mod sorted;
pub mod tree;
pub mod view;
