//! Insertion-point search over sorted sequences.
//!
//! A plain binary search stops at *some* element equal to the target, which
//! is not enough to insert duplicates at a predictable place. The search here
//! keeps going past equal elements in the requested direction and reports
//! separately whether an equal element was seen.

use std::cmp::Ordering;

use super::comparer::Comparer;
use crate::tree::TreeCore;

/// Where a value equal to existing elements is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// Before the first equal element (lower bound).
    BeforeEqual,
    /// After the last equal element (upper bound).
    AfterEqual,
}

/// Result of [`insertion_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchOutcome {
    /// `true` if an element comparing equal to the target exists.
    pub found: bool,
    /// Position at which the target would be inserted under the tie break.
    pub index: usize,
}

/// Searches positions `0..length` of a sorted sequence.
///
/// `compare_at(i)` must order element `i` relative to the target. The
/// returned index is the lower bound for [`TieBreak::BeforeEqual`] and the
/// upper bound for [`TieBreak::AfterEqual`]; with `BeforeEqual`, a found
/// element sits at `index`, and with `AfterEqual` at `index - 1`.
///
/// # Complexity
///
/// O(log N) calls to `compare_at`
///
/// # Examples
///
/// ```rust
/// use treelist::sorted::{TieBreak, insertion_point};
///
/// let values = [1, 3, 3, 3, 5];
/// let before = insertion_point(values.len(), TieBreak::BeforeEqual, |index| values[index].cmp(&3));
/// let after = insertion_point(values.len(), TieBreak::AfterEqual, |index| values[index].cmp(&3));
/// assert_eq!((before.found, before.index), (true, 1));
/// assert_eq!((after.found, after.index), (true, 4));
///
/// let missing = insertion_point(values.len(), TieBreak::AfterEqual, |index| values[index].cmp(&4));
/// assert_eq!((missing.found, missing.index), (false, 4));
/// ```
pub fn insertion_point<F>(length: usize, tie_break: TieBreak, mut compare_at: F) -> SearchOutcome
where
    F: FnMut(usize) -> Ordering,
{
    let mut found = false;
    let mut low = 0;
    let mut high = length;
    while low < high {
        let middle = low + (high - low) / 2;
        let ordering = match compare_at(middle) {
            Ordering::Equal => {
                found = true;
                match tie_break {
                    TieBreak::BeforeEqual => Ordering::Greater,
                    TieBreak::AfterEqual => Ordering::Less,
                }
            }
            ordering => ordering,
        };
        if ordering == Ordering::Less {
            low = middle + 1;
        } else {
            high = middle;
        }
    }
    SearchOutcome { found, index: low }
}

/// Runs [`insertion_point`] for `value` over a tree sorted by `comparer`.
pub(crate) fn locate<T, C>(tree: &TreeCore<T>, comparer: &C, value: &T, tie_break: TieBreak) -> SearchOutcome
where
    C: Comparer<T> + ?Sized,
{
    insertion_point(tree.len(), tie_break, |index| {
        comparer.compare(tree.element(index), value)
    })
}

/// Returns the position of an element of `tree` equal to `value` under `comparer`.
///
/// With duplicates, this is the first of them.
pub(crate) fn find<T, C>(tree: &TreeCore<T>, comparer: &C, value: &T) -> Option<usize>
where
    C: Comparer<T> + ?Sized,
{
    let outcome = locate(tree, comparer, value, TieBreak::BeforeEqual);
    outcome.found.then_some(outcome.index)
}
