//! Persistent (immutable) indexed lists.
//!
//! This module provides an immutable list with structural sharing and the
//! builder used to edit it in batches:
//!
//! - [`PersistentTreeList`]: Immutable snapshot of a balanced multi-way tree
//! - [`TreeListBuilder`]: Mutable staging area that copies shared pages on first touch
//!
//! # Structural Sharing
//!
//! A snapshot's pages are never written once the snapshot has been returned.
//! Every edit copies the pages on the path from the root to the edited leaf
//! and shares everything else with the source, so old and new versions
//! coexist at O(log N) extra cost per edit.
//!
//! # Examples
//!
//! ## `PersistentTreeList`
//!
//! ```rust
//! use treelist::persistent::PersistentTreeList;
//!
//! let list: PersistentTreeList<i32> = (0..100).collect();
//! assert_eq!(list.get(50), Some(&50));
//!
//! // Structural sharing: the original list is preserved
//! let updated = list.set_item(50, 999).unwrap();
//! assert_eq!(list.get(50), Some(&50));       // Original unchanged
//! assert_eq!(updated.get(50), Some(&999));   // New version
//! ```
//!
//! ## `TreeListBuilder`
//!
//! ```rust
//! use treelist::persistent::PersistentTreeList;
//!
//! let list: PersistentTreeList<i32> = (0..10).collect();
//!
//! // Convert to a builder for batch updates
//! let mut builder = list.to_builder();
//! builder.remove_all(|value| value % 2 == 0);
//! builder.push_back(11);
//!
//! // Freeze back into a snapshot
//! let odd = builder.to_immutable();
//! assert_eq!(odd.len(), 6);
//! assert_eq!(list.len(), 10);
//! ```
//!
//! # Thread Safety
//!
//! With the `arc` feature, pages are held through `std::sync::Arc` and
//! snapshots are `Send + Sync`: any number of threads may read the same
//! snapshot. Builders are never `Send` or `Sync`.

mod builder;
mod list;

pub use builder::TreeListBuilder;
pub use list::PersistentTreeList;

#[cfg(feature = "arc")]
mod arc_send_sync_verification {
    use super::PersistentTreeList;

    static_assertions::assert_impl_all!(PersistentTreeList<i32>: Send, Sync);
    static_assertions::assert_impl_all!(PersistentTreeList<String>: Send, Sync);
}

#[cfg(not(feature = "arc"))]
mod rc_send_sync_verification {
    use super::PersistentTreeList;

    static_assertions::assert_not_impl_any!(PersistentTreeList<i32>: Send, Sync);
}
