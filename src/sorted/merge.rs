//! Coordinated forward scans over two sorted, duplicate-free sequences.

use std::cmp::Ordering;
use std::iter::{FusedIterator, Peekable};

/// One step of a merge: an element found on one side only, or on both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side<'a, T> {
    Left(&'a T),
    Both(&'a T, &'a T),
    Right(&'a T),
}

/// Walks two sequences sorted by the same order in lockstep.
///
/// Both inputs must be sorted by `compare` without duplicates; each step
/// consumes the smaller head, or both heads when they compare equal. The
/// whole scan is O(n + m).
pub(crate) struct MergeJoin<'a, T: 'a, L, R, F>
where
    L: Iterator<Item = &'a T>,
    R: Iterator<Item = &'a T>,
{
    left: Peekable<L>,
    right: Peekable<R>,
    compare: F,
}

impl<'a, T, L, R, F> MergeJoin<'a, T, L, R, F>
where
    T: 'a,
    L: Iterator<Item = &'a T>,
    R: Iterator<Item = &'a T>,
    F: FnMut(&T, &T) -> Ordering,
{
    pub(crate) fn new(left: L, right: R, compare: F) -> Self {
        Self {
            left: left.peekable(),
            right: right.peekable(),
            compare,
        }
    }
}

impl<'a, T, L, R, F> Iterator for MergeJoin<'a, T, L, R, F>
where
    T: 'a,
    L: Iterator<Item = &'a T>,
    R: Iterator<Item = &'a T>,
    F: FnMut(&T, &T) -> Ordering,
{
    type Item = Side<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let ordering = match (self.left.peek(), self.right.peek()) {
            (None, None) => return None,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(left), Some(right)) => (self.compare)(*left, *right),
        };
        match ordering {
            Ordering::Less => self.left.next().map(Side::Left),
            Ordering::Greater => self.right.next().map(Side::Right),
            Ordering::Equal => self.left.next().zip(self.right.next()).map(|(left, right)| Side::Both(left, right)),
        }
    }
}

impl<'a, T, L, R, F> FusedIterator for MergeJoin<'a, T, L, R, F>
where
    T: 'a,
    L: FusedIterator<Item = &'a T>,
    R: FusedIterator<Item = &'a T>,
    F: FnMut(&T, &T) -> Ordering,
{
}

/// How many elements a merge saw on each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Overlap {
    pub(crate) only_left: usize,
    pub(crate) both: usize,
    pub(crate) only_right: usize,
}

impl Overlap {
    /// Counts the sides of a complete merge.
    pub(crate) fn measure<'a, T: 'a>(merge: impl Iterator<Item = Side<'a, T>>) -> Self {
        merge.fold(Self::default(), |mut overlap, side| {
            match side {
                Side::Left(_) => overlap.only_left += 1,
                Side::Both(..) => overlap.both += 1,
                Side::Right(_) => overlap.only_right += 1,
            }
            overlap
        })
    }
}
