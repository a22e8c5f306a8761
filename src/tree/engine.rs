//! The root-owning tree shared by every collection in the crate.

use std::cmp::Ordering;

use super::branch::BranchNode;
use super::iter::Iter;
use super::node::{Edit, Node, NodeRef, OwnerToken, make_exclusive};
use super::{BranchingFactor, ReferenceCounter};
use crate::error::{CollectionError, check_range};

/// A root page plus the branching factor used to edit it.
///
/// `TreeCore` knows nothing about who owns it: every mutating method takes
/// the [`OwnerToken`] of the editor performing the change, and pages carrying
/// another token are copied before they are written. Cloning a `TreeCore` is
/// O(1) and shares every page.
///
/// Indices passed to the mutating methods must already have been validated.
pub(crate) struct TreeCore<T> {
    root: NodeRef<T>,
    branching_factor: BranchingFactor,
}

impl<T> Clone for TreeCore<T> {
    fn clone(&self) -> Self {
        Self {
            root: ReferenceCounter::clone(&self.root),
            branching_factor: self.branching_factor,
        }
    }
}

impl<T> TreeCore<T> {
    /// Creates an empty tree whose single leaf belongs to `owner`.
    pub(crate) fn new(branching_factor: BranchingFactor, owner: OwnerToken) -> Self {
        let edit = Edit {
            owner,
            branching_factor,
        };
        Self {
            root: ReferenceCounter::new(Node::empty(edit)),
            branching_factor,
        }
    }

    #[inline]
    const fn edit(&self, owner: OwnerToken) -> Edit {
        Edit {
            owner,
            branching_factor: self.branching_factor,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.root.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub(crate) const fn branching_factor(&self) -> BranchingFactor {
        self.branching_factor
    }

    #[inline]
    pub(crate) fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Returns `true` when both trees are backed by the same root page.
    #[inline]
    pub(crate) fn shares_root_with(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.root, &other.root)
    }

    /// Number of page levels, counting the root.
    pub(crate) fn height(&self) -> usize {
        let mut height = 1;
        let mut node: &Node<T> = &self.root;
        while let Node::Branch(branch) = node {
            node = branch.child(0);
            height += 1;
        }
        height
    }

    /// Returns the element at `index`, which must be below `self.len()`.
    #[inline]
    pub(crate) fn element(&self, index: usize) -> &T {
        self.root.element(index)
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        (index < self.len()).then(|| self.element(index))
    }

    #[inline]
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, 0)
    }

    /// Iterates from `start`, which must not exceed `self.len()`.
    #[inline]
    pub(crate) fn iter_from(&self, start: usize) -> Iter<'_, T> {
        Iter::new(&self.root, start)
    }

    /// Returns the first index in `index..index + count` whose element satisfies `predicate`.
    pub(crate) fn position<P>(&self, index: usize, count: usize, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.root.position_in(index, index + count, &mut predicate)
    }

    /// Binary search over `index..index + count`.
    ///
    /// `probe` reports how an element orders relative to the target, exactly
    /// as for [`slice::binary_search_by`]. Each probe descends from the root,
    /// so the search costs O(log² N).
    pub(crate) fn binary_search_by<F>(&self, index: usize, count: usize, mut probe: F) -> Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut low = index;
        let mut high = index + count;
        while low < high {
            let middle = low + (high - low) / 2;
            match probe(self.element(middle)) {
                Ordering::Less => low = middle + 1,
                Ordering::Greater => high = middle,
                Ordering::Equal => return Ok(middle),
            }
        }
        Err(low)
    }

    /// Replaces the root with its only child for as long as it has one.
    fn collapse_root(&mut self, edit: Edit) {
        loop {
            let replacement = match &*self.root {
                Node::Branch(branch) if branch.width() == 1 => {
                    ReferenceCounter::clone(&branch.children()[0])
                }
                Node::Branch(branch) if branch.width() == 0 => {
                    ReferenceCounter::new(Node::empty(edit))
                }
                _ => break,
            };
            self.root = replacement;
            log::trace!("collapsed tree root; height is now {}", self.height());
        }
    }
}

impl<T: Clone> TreeCore<T> {
    /// Replaces the element at `index`, returning the previous value.
    pub(crate) fn set(&mut self, owner: OwnerToken, index: usize, value: T) -> T {
        let edit = self.edit(owner);
        make_exclusive(&mut self.root, edit).set(edit, index, value)
    }

    /// Inserts `value` at `index`, which must not exceed `self.len()`.
    pub(crate) fn insert(&mut self, owner: OwnerToken, index: usize, value: T) {
        let edit = self.edit(owner);
        let is_append = index == self.len();
        let split = make_exclusive(&mut self.root, edit).insert(edit, is_append, index, value);

        if let Some(sibling) = split {
            let left = ReferenceCounter::clone(&self.root);
            let branch = BranchNode::with_children(edit, left, ReferenceCounter::new(sibling));
            self.root = ReferenceCounter::new(Node::Branch(branch));
            log::trace!(
                "promoted tree root; height is now {} with {} elements",
                self.height(),
                self.len()
            );
        }
    }

    /// Removes and returns the element at `index`, which must be below `self.len()`.
    pub(crate) fn remove_at(&mut self, owner: OwnerToken, index: usize) -> T {
        let edit = self.edit(owner);
        let (value, _) = make_exclusive(&mut self.root, edit).remove_at(edit, index);
        self.collapse_root(edit);
        value
    }

    /// Replaces the tree with an empty one owned by `owner`.
    pub(crate) fn clear(&mut self, owner: OwnerToken) {
        self.root = ReferenceCounter::new(Node::empty(self.edit(owner)));
    }

    /// Clones `count` elements starting at `source_index` into `destination`.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::NullArgument`] when `destination` is `None`.
    /// - [`CollectionError::ArgumentOutOfRange`] when `destination_index` is negative
    ///   or the source range starts past the end.
    /// - [`CollectionError::InvalidArgument`] when the source range runs past the end,
    ///   or `destination` has fewer than `count` slots from `destination_index`.
    pub(crate) fn copy_range_to(
        &self,
        source_index: usize,
        destination: Option<&mut [T]>,
        destination_index: isize,
        count: usize,
    ) -> Result<(), CollectionError> {
        let destination = destination.ok_or(CollectionError::NullArgument {
            parameter: "destination",
        })?;
        let Ok(destination_index) = usize::try_from(destination_index) else {
            return Err(CollectionError::ArgumentOutOfRange {
                parameter: "destination_index",
                value: destination_index,
                bound: destination.len(),
            });
        };
        check_range(source_index, count, self.len())?;
        if destination_index > destination.len() || destination.len() - destination_index < count {
            return Err(CollectionError::InvalidArgument {
                parameter: "destination",
                reason: "destination is too short for the requested number of elements",
            });
        }

        let slots = &mut destination[destination_index..destination_index + count];
        for (slot, element) in slots.iter_mut().zip(self.iter_from(source_index)) {
            slot.clone_from(element);
        }
        Ok(())
    }
}
