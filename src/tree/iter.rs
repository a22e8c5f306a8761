//! Borrowed in-order traversal.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::branch::BranchNode;
use super::node::Node;

/// A branch on the path to the current leaf and the next child to visit.
struct Frame<'a, T> {
    branch: &'a BranchNode<T>,
    next_child: usize,
}

impl<T> Clone for Frame<'_, T> {
    fn clone(&self) -> Self {
        Self {
            branch: self.branch,
            next_child: self.next_child,
        }
    }
}

/// An iterator over references to the elements of a tree, in index order.
///
/// The iterator keeps the path from the root to the current leaf, so every
/// step is O(1) amortized and a full traversal is O(N). Because it borrows
/// the collection, the borrow checker rules out structural changes while it
/// is alive; see [`TreeListCursor`](super::TreeListCursor) for a detached,
/// version-checked walk.
pub struct Iter<'a, T> {
    /// Path stack; trees deeper than eight levels spill to the heap
    stack: SmallVec<[Frame<'a, T>; 8]>,
    /// Unvisited part of the current leaf
    leaf: std::slice::Iter<'a, T>,
    /// Elements not yet returned
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Positions a new iterator on element `start` of the tree under `root`.
    pub(crate) fn new(root: &'a Node<T>, start: usize) -> Self {
        let mut stack = SmallVec::new();
        let mut node = root;
        let mut relative = start;
        loop {
            match node {
                Node::Branch(branch) => {
                    let child_index = branch.locate(relative);
                    relative -= branch.offset(child_index);
                    stack.push(Frame {
                        branch,
                        next_child: child_index + 1,
                    });
                    node = branch.child(child_index);
                }
                Node::Leaf(leaf) => {
                    return Self {
                        stack,
                        leaf: leaf.elements()[relative..].iter(),
                        remaining: root.len() - start,
                    };
                }
            }
        }
    }

    /// Moves to the first leaf after the current one.
    fn advance_leaf(&mut self) -> bool {
        while let Some(frame) = self.stack.last_mut() {
            if frame.next_child < frame.branch.width() {
                let mut node = frame.branch.child(frame.next_child);
                frame.next_child += 1;
                loop {
                    match node {
                        Node::Branch(branch) => {
                            self.stack.push(Frame {
                                branch,
                                next_child: 1,
                            });
                            node = branch.child(0);
                        }
                        Node::Leaf(leaf) => {
                            self.leaf = leaf.elements().iter();
                            return true;
                        }
                    }
                }
            }
            self.stack.pop();
        }
        false
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self.leaf.next() {
                self.remaining -= 1;
                return Some(element);
            }
            if self.remaining == 0 || !self.advance_leaf() {
                return None;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            leaf: self.leaf.clone(),
            remaining: self.remaining,
        }
    }
}
