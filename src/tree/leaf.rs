//! Leaf pages.

use super::node::{Edit, OwnerToken};

/// A page holding up to `B` elements in order.
#[derive(Clone)]
pub(crate) struct LeafNode<T> {
    owner: OwnerToken,
    elements: Vec<T>,
}

impl<T> LeafNode<T> {
    pub(crate) fn new(edit: Edit) -> Self {
        Self {
            owner: edit.owner,
            elements: Vec::with_capacity(edit.capacity()),
        }
    }

    fn with_element(edit: Edit, value: T) -> Self {
        let mut leaf = Self::new(edit);
        leaf.elements.push(value);
        leaf
    }

    #[inline]
    pub(crate) const fn owner(&self) -> OwnerToken {
        self.owner
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub(crate) fn elements(&self) -> &[T] {
        &self.elements
    }

    pub(crate) fn position_in<P>(&self, start: usize, end: usize, predicate: &mut P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.elements[start..end]
            .iter()
            .position(|element| predicate(element))
            .map(|position| start + position)
    }

    pub(crate) fn set(&mut self, index: usize, value: T) -> T {
        std::mem::replace(&mut self.elements[index], value)
    }

    /// Inserts `value` at `index`, splitting when the page is full.
    ///
    /// A full page at the end of the tree starts a new sibling holding only the
    /// new value, so sequential appends leave every earlier leaf full. Any other
    /// split divides the `B + 1` elements so both halves keep `⌈B/2⌉` or more.
    pub(crate) fn insert(&mut self, edit: Edit, is_append: bool, index: usize, value: T) -> Option<Self> {
        if self.elements.len() < edit.capacity() {
            self.elements.insert(index, value);
            return None;
        }

        if is_append {
            return Some(Self::with_element(edit, value));
        }

        let retained = edit.minimum();
        let goes_left = index < retained;
        let split_point = if goes_left { retained - 1 } else { retained };

        let mut sibling = Self::new(edit);
        sibling.elements.extend(self.elements.drain(split_point..));

        if goes_left {
            self.elements.insert(index, value);
        } else {
            sibling.elements.insert(index - split_point, value);
        }

        Some(sibling)
    }

    pub(crate) fn remove_at(&mut self, edit: Edit, index: usize) -> (T, bool) {
        let value = self.elements.remove(index);
        (value, self.elements.len() < edit.minimum())
    }

    pub(crate) fn absorb(&mut self, right: Self) {
        self.elements.extend(right.elements);
    }

    pub(crate) fn pop_front(&mut self) -> T {
        self.elements.remove(0)
    }

    pub(crate) fn push_front(&mut self, value: T) {
        self.elements.insert(0, value);
    }

    pub(crate) fn pop_back(&mut self) -> T {
        match self.elements.pop() {
            Some(value) => value,
            None => unreachable!("a donating page is never empty"),
        }
    }

    pub(crate) fn push_back(&mut self, value: T) {
        self.elements.push(value);
    }
}

impl<T: Clone> LeafNode<T> {
    pub(crate) fn clone_for(&self, edit: Edit) -> Self {
        let mut elements = Vec::with_capacity(edit.capacity());
        elements.extend_from_slice(&self.elements);
        Self {
            owner: edit.owner,
            elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::BranchingFactor;
    use rstest::rstest;

    fn edit(capacity: usize) -> Edit {
        Edit {
            owner: OwnerToken::fresh(),
            branching_factor: BranchingFactor::new(capacity).unwrap(),
        }
    }

    fn full_leaf(edit: Edit) -> LeafNode<i32> {
        let mut leaf = LeafNode::new(edit);
        for value in 0..i32::try_from(edit.capacity()).unwrap() {
            assert!(leaf.insert(edit, true, leaf.len(), value * 10).is_none());
        }
        leaf
    }

    #[rstest]
    fn test_insert_shifts_elements() {
        let edit = edit(4);
        let mut leaf = LeafNode::new(edit);
        leaf.insert(edit, true, 0, 1);
        leaf.insert(edit, true, 1, 3);
        leaf.insert(edit, false, 1, 2);
        assert_eq!(leaf.elements(), &[1, 2, 3]);
    }

    #[rstest]
    #[case(4, 0)]
    #[case(4, 2)]
    #[case(4, 4)]
    #[case(5, 0)]
    #[case(5, 3)]
    #[case(5, 5)]
    fn test_split_keeps_minimum_occupancy(#[case] capacity: usize, #[case] index: usize) {
        let edit = edit(capacity);
        let mut leaf = full_leaf(edit);
        let sibling = leaf.insert(edit, false, index, -1).unwrap();

        assert_eq!(leaf.len() + sibling.len(), capacity + 1);
        assert!(leaf.len() >= edit.minimum());
        assert!(sibling.len() >= edit.minimum());

        let combined: Vec<i32> = leaf
            .elements()
            .iter()
            .chain(sibling.elements())
            .copied()
            .collect();
        assert_eq!(combined[index], -1);
    }

    #[rstest]
    fn test_append_split_starts_fresh_sibling() {
        let edit = edit(4);
        let mut leaf = full_leaf(edit);
        let sibling = leaf.insert(edit, true, 4, 99).unwrap();
        assert_eq!(leaf.len(), 4);
        assert_eq!(sibling.elements(), &[99]);
    }

    #[rstest]
    fn test_remove_reports_underflow() {
        let edit = edit(4);
        let mut leaf = full_leaf(edit);
        assert_eq!(leaf.remove_at(edit, 0), (0, false));
        assert_eq!(leaf.remove_at(edit, 0), (10, false));
        assert_eq!(leaf.remove_at(edit, 0), (20, true));
    }

    #[rstest]
    fn test_position_in_respects_bounds() {
        let edit = edit(4);
        let leaf = full_leaf(edit);
        assert_eq!(leaf.position_in(0, 4, &mut |value| *value == 20), Some(2));
        assert_eq!(leaf.position_in(3, 4, &mut |value| *value == 20), None);
    }
}
