//! Branch (index) pages.

use super::ReferenceCounter;
use super::node::{Edit, Node, NodeRef, OwnerToken, make_exclusive};

/// A page holding up to `B` children and the number of elements before each.
///
/// Invariants: `offsets[0] == 0`, `offsets[i] == offsets[i - 1] + len(children[i - 1])`,
/// and `count == offsets[last] + len(children[last])`.
#[derive(Clone)]
pub(crate) struct BranchNode<T> {
    owner: OwnerToken,
    offsets: Vec<usize>,
    children: Vec<NodeRef<T>>,
    count: usize,
}

impl<T> BranchNode<T> {
    fn new(edit: Edit) -> Self {
        Self {
            owner: edit.owner,
            offsets: Vec::with_capacity(edit.capacity()),
            children: Vec::with_capacity(edit.capacity()),
            count: 0,
        }
    }

    /// Creates the branch placed above a root that just split.
    pub(crate) fn with_children(edit: Edit, left: NodeRef<T>, right: NodeRef<T>) -> Self {
        let mut branch = Self::new(edit);
        branch.push_back_child(left);
        branch.push_back_child(right);
        branch
    }

    #[inline]
    pub(crate) const fn owner(&self) -> OwnerToken {
        self.owner
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn width(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub(crate) fn children(&self) -> &[NodeRef<T>] {
        &self.children
    }

    #[inline]
    pub(crate) fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[inline]
    pub(crate) fn child(&self, child_index: usize) -> &Node<T> {
        &self.children[child_index]
    }

    #[inline]
    pub(crate) fn offset(&self, child_index: usize) -> usize {
        self.offsets[child_index]
    }

    /// Returns the child holding global position `index`.
    ///
    /// This is the largest child whose offset is `<= index`. A position equal to
    /// an offset routes to the child starting there; the position one past the
    /// last element routes to the last child.
    pub(crate) fn locate(&self, index: usize) -> usize {
        match self.offsets.binary_search(&index) {
            Ok(child_index) => child_index,
            Err(insertion) => insertion - 1,
        }
    }

    pub(crate) fn position_in<P>(&self, start: usize, end: usize, predicate: &mut P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        if start >= end {
            return None;
        }
        let first = self.locate(start);
        for child_index in first..self.children.len() {
            let offset = self.offsets[child_index];
            if offset >= end {
                break;
            }
            let child = &self.children[child_index];
            let local_start = start.saturating_sub(offset);
            let local_end = (end - offset).min(child.len());
            if let Some(position) = child.position_in(local_start, local_end, predicate) {
                return Some(offset + position);
            }
        }
        None
    }

    /// Rebuilds `offsets[from..]` and `count` from the children's sizes.
    fn recompute_offsets(&mut self, from: usize) {
        if let Some(first) = self.offsets.first_mut() {
            *first = 0;
        }
        for child_index in from.max(1)..self.children.len() {
            self.offsets[child_index] =
                self.offsets[child_index - 1] + self.children[child_index - 1].len();
        }
        self.count = match (self.offsets.last(), self.children.last()) {
            (Some(offset), Some(child)) => offset + child.len(),
            _ => 0,
        };
    }

    pub(crate) fn push_back_child(&mut self, child: NodeRef<T>) {
        self.offsets.push(self.count);
        self.count += child.len();
        self.children.push(child);
    }

    pub(crate) fn pop_back_child(&mut self) -> NodeRef<T> {
        self.offsets.pop();
        match self.children.pop() {
            Some(child) => {
                self.count -= child.len();
                child
            }
            None => unreachable!("a donating page is never empty"),
        }
    }

    pub(crate) fn push_front_child(&mut self, child: NodeRef<T>) {
        let delta = child.len();
        for offset in &mut self.offsets {
            *offset += delta;
        }
        self.offsets.insert(0, 0);
        self.children.insert(0, child);
        self.count += delta;
    }

    pub(crate) fn pop_front_child(&mut self) -> NodeRef<T> {
        let child = self.children.remove(0);
        self.offsets.remove(0);
        let delta = child.len();
        for offset in &mut self.offsets {
            *offset -= delta;
        }
        self.count -= delta;
        child
    }

    pub(crate) fn absorb(&mut self, right: Self) {
        for child in right.children {
            self.push_back_child(child);
        }
    }

    /// Links `child` at slot `child_index`, splitting when the page is full.
    ///
    /// Mirrors the leaf split: at the end of the tree a full page starts a new
    /// sibling holding only `child`; otherwise the `B + 1` children are divided
    /// so both halves keep `⌈B/2⌉` or more, and the sibling's offsets are
    /// rebased to start at zero.
    fn insert_child(&mut self, edit: Edit, is_append: bool, child_index: usize, child: NodeRef<T>) -> Option<Self> {
        if self.children.len() < edit.capacity() {
            let offset = if child_index < self.children.len() {
                self.offsets[child_index]
            } else {
                self.count
            };
            let delta = child.len();
            self.children.insert(child_index, child);
            self.offsets.insert(child_index, offset);
            for later in &mut self.offsets[child_index + 1..] {
                *later += delta;
            }
            self.count += delta;
            return None;
        }

        if is_append {
            let mut sibling = Self::new(edit);
            sibling.push_back_child(child);
            return Some(sibling);
        }

        let retained = edit.minimum();
        let goes_left = child_index < retained;
        let split_point = if goes_left { retained - 1 } else { retained };

        let adjustment = self.offsets[split_point];
        let mut sibling = Self::new(edit);
        sibling.children.extend(self.children.drain(split_point..));
        sibling
            .offsets
            .extend(self.offsets.drain(split_point..).map(|offset| offset - adjustment));
        sibling.count = self.count - adjustment;
        self.count = adjustment;

        let overflow = if goes_left {
            self.insert_child(edit, false, child_index, child)
        } else {
            sibling.insert_child(edit, false, child_index - split_point, child)
        };
        debug_assert!(overflow.is_none(), "a freshly split page has room");

        Some(sibling)
    }
}

impl<T: Clone> BranchNode<T> {
    pub(crate) fn clone_for(&self, edit: Edit) -> Self {
        let mut offsets = Vec::with_capacity(edit.capacity());
        offsets.extend_from_slice(&self.offsets);
        let mut children = Vec::with_capacity(edit.capacity());
        children.extend(self.children.iter().map(ReferenceCounter::clone));
        Self {
            owner: edit.owner,
            offsets,
            children,
            count: self.count,
        }
    }

    pub(crate) fn set(&mut self, edit: Edit, index: usize, value: T) -> T {
        let child_index = self.locate(index);
        let relative = index - self.offsets[child_index];
        make_exclusive(&mut self.children[child_index], edit).set(edit, relative, value)
    }

    pub(crate) fn insert(&mut self, edit: Edit, is_append: bool, index: usize, value: T) -> Option<Self> {
        let child_index = self.locate(index);
        let relative = index - self.offsets[child_index];
        let split = make_exclusive(&mut self.children[child_index], edit)
            .insert(edit, is_append, relative, value);

        match split {
            None => {
                for later in &mut self.offsets[child_index + 1..] {
                    *later += 1;
                }
                self.count += 1;
                None
            }
            Some(sibling) => {
                // the child shrank; the sibling's elements are re-added by insert_child
                self.recompute_offsets(child_index + 1);
                self.insert_child(edit, is_append, child_index + 1, ReferenceCounter::new(sibling))
            }
        }
    }

    pub(crate) fn remove_at(&mut self, edit: Edit, index: usize) -> (T, bool) {
        let child_index = self.locate(index);
        let relative = index - self.offsets[child_index];
        let (value, child_underflow) =
            make_exclusive(&mut self.children[child_index], edit).remove_at(edit, relative);

        for later in &mut self.offsets[child_index + 1..] {
            *later -= 1;
        }
        self.count -= 1;

        if child_underflow {
            self.repair(edit, child_index);
        }

        (value, self.children.len() < edit.minimum())
    }

    /// Restores occupancy of the child at `child_index` after a removal.
    ///
    /// An empty child is unlinked. Otherwise the child is paired with its left
    /// neighbour (or its right one, for the first child): the pair is merged
    /// when both fit on one page, and one entry moves across otherwise. A lone
    /// child is left for the parent of this page to deal with.
    fn repair(&mut self, edit: Edit, child_index: usize) {
        if self.children[child_index].len() == 0 {
            self.children.remove(child_index);
            self.offsets.remove(child_index);
            self.recompute_offsets(child_index);
            return;
        }

        if self.children.len() < 2 {
            return;
        }

        let left_index = child_index.saturating_sub(1);
        let right_index = left_index + 1;
        let combined = self.children[left_index].width() + self.children[right_index].width();

        if combined <= edit.capacity() {
            let right = self.children.remove(right_index);
            self.offsets.remove(right_index);
            make_exclusive(&mut self.children[left_index], edit)
                .absorb(ReferenceCounter::unwrap_or_clone(right));
        } else {
            let (head, tail) = self.children.split_at_mut(right_index);
            let left = make_exclusive(&mut head[left_index], edit);
            let right = make_exclusive(&mut tail[0], edit);
            if child_index == left_index {
                Node::rotate_left(left, right);
            } else {
                Node::rotate_right(left, right);
            }
        }

        self.recompute_offsets(right_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::BranchingFactor;
    use crate::tree::leaf::LeafNode;
    use rstest::rstest;

    fn edit() -> Edit {
        Edit {
            owner: OwnerToken::fresh(),
            branching_factor: BranchingFactor::new(4).unwrap(),
        }
    }

    fn leaf(edit: Edit, values: &[i32]) -> NodeRef<i32> {
        let mut leaf = LeafNode::new(edit);
        for &value in values {
            leaf.push_back(value);
        }
        ReferenceCounter::new(Node::Leaf(leaf))
    }

    fn branch(edit: Edit, leaves: &[&[i32]]) -> BranchNode<i32> {
        let mut branch = BranchNode::new(edit);
        for values in leaves {
            branch.push_back_child(leaf(edit, values));
        }
        branch
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 0)]
    #[case(3, 1)]
    #[case(5, 1)]
    #[case(6, 2)]
    #[case(8, 2)]
    fn test_locate_uses_lower_bound(#[case] index: usize, #[case] expected: usize) {
        let edit = edit();
        let branch = branch(edit, &[&[0, 1, 2], &[3, 4, 5], &[6, 7]]);
        assert_eq!(branch.locate(index), expected);
    }

    #[rstest]
    fn test_offsets_track_children() {
        let edit = edit();
        let branch = branch(edit, &[&[0, 1, 2], &[3, 4], &[5, 6, 7]]);
        assert_eq!(branch.offsets(), &[0, 3, 5]);
        assert_eq!(branch.len(), 8);
    }

    #[rstest]
    fn test_insert_bumps_later_offsets() {
        let edit = edit();
        let mut branch = branch(edit, &[&[0, 1, 2], &[3, 4], &[5, 6, 7]]);
        assert!(branch.insert(edit, false, 1, 100).is_none());
        assert_eq!(branch.offsets(), &[0, 4, 6]);
        assert_eq!(branch.len(), 9);
    }

    #[rstest]
    fn test_full_branch_splits_and_rebases_offsets() {
        let edit = edit();
        let mut branch = branch(edit, &[&[0, 1, 2, 3], &[4, 5], &[6, 7], &[8, 9]]);
        let sibling = branch.insert(edit, false, 2, 100).unwrap();

        assert_eq!(branch.width() + sibling.width(), 5);
        assert!(branch.width() >= 2);
        assert!(sibling.width() >= 2);
        assert_eq!(sibling.offsets()[0], 0);
        assert_eq!(branch.len() + sibling.len(), 11);
    }

    #[rstest]
    fn test_append_on_full_branch_starts_fresh_sibling() {
        let edit = edit();
        let mut branch = branch(edit, &[&[0, 1], &[2, 3], &[4, 5], &[6, 7, 8, 9]]);
        let sibling = branch.insert(edit, true, 10, 10).unwrap();

        assert_eq!(branch.width(), 4);
        assert_eq!(sibling.width(), 1);
        assert_eq!(sibling.len(), 1);
    }

    #[rstest]
    fn test_remove_merges_underflowing_child() {
        let edit = edit();
        let mut branch = branch(edit, &[&[0, 1], &[2, 3], &[4, 5]]);
        let (value, underflow) = branch.remove_at(edit, 2);

        assert_eq!(value, 2);
        assert!(!underflow);
        assert_eq!(branch.width(), 2);
        assert_eq!(branch.offsets(), &[0, 3]);
        assert_eq!(branch.len(), 5);
    }

    #[rstest]
    fn test_remove_borrows_from_rich_sibling() {
        let edit = edit();
        let mut branch = branch(edit, &[&[0, 1, 2, 3], &[4, 5]]);
        let (value, _) = branch.remove_at(edit, 5);

        assert_eq!(value, 5);
        assert_eq!(branch.width(), 2);
        assert_eq!(branch.offsets(), &[0, 3]);
        assert_eq!(branch.child(1).width(), 2);
    }

    #[rstest]
    fn test_remove_unlinks_emptied_child() {
        let edit = edit();
        let mut branch = branch(edit, &[&[0, 1, 2, 3], &[4]]);
        let (value, _) = branch.remove_at(edit, 4);

        assert_eq!(value, 4);
        assert_eq!(branch.width(), 1);
        assert_eq!(branch.len(), 4);
    }
}
