//! Tree pages and the ownership tags that drive copy-on-write.

use std::sync::atomic::{AtomicU64, Ordering};

use super::branch::BranchNode;
use super::leaf::LeafNode;
use super::{BranchingFactor, ReferenceCounter};

// =============================================================================
// Ownership
// =============================================================================

/// Source of owner identities. Zero is reserved for [`OwnerToken::SHARED`].
static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Identity of the editor allowed to mutate a page in place.
///
/// Every page records the token of the editor that created or cloned it. An
/// editor may only mutate pages carrying its own token; any other page is
/// shared with a published snapshot and is cloned before it is touched.
/// Freezing an editor gives it a fresh token, which turns every page it built
/// so far into a shared page without visiting any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct OwnerToken(u64);

impl OwnerToken {
    /// The token carried by pages that no editor owns.
    pub(crate) const SHARED: Self = Self(0);

    /// Allocates a token that no other editor holds.
    pub(crate) fn fresh() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }
}

/// The parameters every structural edit needs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edit {
    /// Editor performing the change.
    pub(crate) owner: OwnerToken,
    /// Page capacity of the tree being edited.
    pub(crate) branching_factor: BranchingFactor,
}

impl Edit {
    #[inline]
    pub(crate) const fn capacity(self) -> usize {
        self.branching_factor.get()
    }

    #[inline]
    pub(crate) const fn minimum(self) -> usize {
        self.branching_factor.minimum_occupancy()
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// Shared handle to a page.
pub(crate) type NodeRef<T> = ReferenceCounter<Node<T>>;

/// A page of the tree.
#[derive(Clone)]
pub(crate) enum Node<T> {
    /// Page holding elements directly
    Leaf(LeafNode<T>),
    /// Page holding children and their offsets
    Branch(BranchNode<T>),
}

impl<T> Node<T> {
    /// Creates the page of an empty tree.
    pub(crate) fn empty(edit: Edit) -> Self {
        Self::Leaf(LeafNode::new(edit))
    }

    #[inline]
    pub(crate) const fn owner(&self) -> OwnerToken {
        match self {
            Self::Leaf(leaf) => leaf.owner(),
            Self::Branch(branch) => branch.owner(),
        }
    }

    /// Number of elements stored beneath this page.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Leaf(leaf) => leaf.len(),
            Self::Branch(branch) => branch.len(),
        }
    }

    /// Number of entries on this page: elements for a leaf, children for a branch.
    #[inline]
    pub(crate) fn width(&self) -> usize {
        match self {
            Self::Leaf(leaf) => leaf.len(),
            Self::Branch(branch) => branch.width(),
        }
    }

    /// Returns the element at `index`, which must be below `self.len()`.
    pub(crate) fn element(&self, index: usize) -> &T {
        match self {
            Self::Leaf(leaf) => &leaf.elements()[index],
            Self::Branch(branch) => {
                let child_index = branch.locate(index);
                branch
                    .child(child_index)
                    .element(index - branch.offset(child_index))
            }
        }
    }

    /// Finds the first index in `start..end` whose element satisfies `predicate`.
    pub(crate) fn position_in<P>(&self, start: usize, end: usize, predicate: &mut P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        match self {
            Self::Leaf(leaf) => leaf.position_in(start, end, predicate),
            Self::Branch(branch) => branch.position_in(start, end, predicate),
        }
    }
}

impl<T: Clone> Node<T> {
    /// Copies this page for `edit.owner`. Children are shared, not copied.
    fn clone_for(&self, edit: Edit) -> Self {
        match self {
            Self::Leaf(leaf) => Self::Leaf(leaf.clone_for(edit)),
            Self::Branch(branch) => Self::Branch(branch.clone_for(edit)),
        }
    }

    /// Replaces the element at `index`, returning the previous value.
    pub(crate) fn set(&mut self, edit: Edit, index: usize, value: T) -> T {
        match self {
            Self::Leaf(leaf) => leaf.set(index, value),
            Self::Branch(branch) => branch.set(edit, index, value),
        }
    }

    /// Inserts `value` at `index`, returning a new right sibling if this page split.
    ///
    /// `is_append` is true when the insertion is at the end of the whole tree.
    pub(crate) fn insert(&mut self, edit: Edit, is_append: bool, index: usize, value: T) -> Option<Self> {
        match self {
            Self::Leaf(leaf) => leaf
                .insert(edit, is_append, index, value)
                .map(Self::Leaf),
            Self::Branch(branch) => branch
                .insert(edit, is_append, index, value)
                .map(Self::Branch),
        }
    }

    /// Removes the element at `index`.
    ///
    /// The flag is true when this page dropped below minimum occupancy and the
    /// parent must repair it.
    pub(crate) fn remove_at(&mut self, edit: Edit, index: usize) -> (T, bool) {
        match self {
            Self::Leaf(leaf) => leaf.remove_at(edit, index),
            Self::Branch(branch) => branch.remove_at(edit, index),
        }
    }

    /// Appends every entry of `right`, a sibling on the same level, to this page.
    pub(crate) fn absorb(&mut self, right: Self) {
        match (self, right) {
            (Self::Leaf(left), Self::Leaf(right)) => left.absorb(right),
            (Self::Branch(left), Self::Branch(right)) => left.absorb(right),
            _ => unreachable!("sibling pages always sit on the same level"),
        }
    }

    /// Moves the first entry of `right` to the end of `left`.
    pub(crate) fn rotate_left(left: &mut Self, right: &mut Self) {
        match (left, right) {
            (Self::Leaf(left), Self::Leaf(right)) => left.push_back(right.pop_front()),
            (Self::Branch(left), Self::Branch(right)) => left.push_back_child(right.pop_front_child()),
            _ => unreachable!("sibling pages always sit on the same level"),
        }
    }

    /// Moves the last entry of `left` to the front of `right`.
    pub(crate) fn rotate_right(left: &mut Self, right: &mut Self) {
        match (left, right) {
            (Self::Leaf(left), Self::Leaf(right)) => right.push_front(left.pop_back()),
            (Self::Branch(left), Self::Branch(right)) => right.push_front_child(left.pop_back_child()),
            _ => unreachable!("sibling pages always sit on the same level"),
        }
    }
}

/// Returns a mutable view of the page in `slot`, cloning it first unless
/// `edit.owner` already owns it.
///
/// The clone replaces the handle in `slot`, so the caller's parent page (or
/// the tree, for the root) now points at the private copy. Pages reachable
/// from a published snapshot are never written through.
pub(crate) fn make_exclusive<T: Clone>(slot: &mut NodeRef<T>, edit: Edit) -> &mut Node<T> {
    if slot.owner() != edit.owner {
        let copy = slot.clone_for(edit);
        *slot = ReferenceCounter::new(copy);
    }
    ReferenceCounter::make_mut(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn edit(owner: OwnerToken) -> Edit {
        Edit {
            owner,
            branching_factor: BranchingFactor::new(4).unwrap(),
        }
    }

    #[rstest]
    fn test_fresh_tokens_are_distinct() {
        let first = OwnerToken::fresh();
        let second = OwnerToken::fresh();
        assert_ne!(first, second);
        assert_ne!(first, OwnerToken::SHARED);
    }

    #[rstest]
    fn test_make_exclusive_clones_foreign_page() {
        let original = edit(OwnerToken::fresh());
        let mut node = Node::empty(original);
        node.insert(original, true, 0, 1);
        let snapshot: NodeRef<i32> = ReferenceCounter::new(node);
        let mut slot = ReferenceCounter::clone(&snapshot);

        let other = edit(OwnerToken::fresh());
        make_exclusive(&mut slot, other).insert(other, true, 1, 2);

        assert!(!ReferenceCounter::ptr_eq(&slot, &snapshot));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(slot.len(), 2);
        assert_eq!(slot.owner(), other.owner);
    }

    #[rstest]
    fn test_make_exclusive_reuses_owned_page() {
        let owner = edit(OwnerToken::fresh());
        let mut slot: NodeRef<i32> = ReferenceCounter::new(Node::empty(owner));
        let before = ReferenceCounter::as_ptr(&slot);

        make_exclusive(&mut slot, owner).insert(owner, true, 0, 7);

        assert_eq!(ReferenceCounter::as_ptr(&slot), before);
        assert_eq!(*slot.element(0), 7);
    }
}
