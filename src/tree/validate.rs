//! Structural checks used by the test suites.

use std::cmp::Ordering;

use super::TreeCore;
use super::node::Node;

/// Panics unless `tree` satisfies every structural invariant.
///
/// Checked: all leaves at the same depth; offsets and counts consistent with
/// the children; no page above capacity; a branch root with at least two
/// children; no empty page below the root; and `⌈B/2⌉` entries or more on
/// every page below the root that is off the right spine.
pub(crate) fn validate<T>(tree: &TreeCore<T>) {
    let capacity = tree.branching_factor().get();
    let minimum = tree.branching_factor().minimum_occupancy();
    let root = tree.root();

    if let Node::Branch(branch) = root {
        assert!(branch.width() >= 2, "branch root has {} children", branch.width());
    }

    let mut leaf_depth = None;
    let counted = walk(root, 0, true, true, capacity, minimum, &mut leaf_depth);
    assert_eq!(counted, tree.len(), "root count disagrees with its leaves");
}

fn walk<T>(
    node: &Node<T>,
    depth: usize,
    is_root: bool,
    on_right_spine: bool,
    capacity: usize,
    minimum: usize,
    leaf_depth: &mut Option<usize>,
) -> usize {
    let width = node.width();
    assert!(width <= capacity, "page at depth {depth} holds {width} > {capacity}");
    if !is_root {
        assert!(width > 0, "empty page at depth {depth}");
        if !on_right_spine {
            assert!(
                width >= minimum,
                "page at depth {depth} holds {width} < {minimum} entries"
            );
        }
    }

    match node {
        Node::Leaf(leaf) => {
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) => assert_eq!(depth, expected, "leaves at unequal depth"),
            }
            leaf.len()
        }
        Node::Branch(branch) => {
            let mut running = 0;
            for (child_index, child) in branch.children().iter().enumerate() {
                assert_eq!(
                    branch.offsets()[child_index],
                    running,
                    "offset {child_index} at depth {depth} is stale"
                );
                let is_last = child_index + 1 == branch.width();
                running += walk(
                    child,
                    depth + 1,
                    false,
                    on_right_spine && is_last,
                    capacity,
                    minimum,
                    leaf_depth,
                );
            }
            assert_eq!(branch.offsets().len(), branch.width());
            assert_eq!(branch.len(), running, "branch count at depth {depth} is stale");
            running
        }
    }
}

/// Panics unless consecutive elements of `tree` are ordered by `compare`.
pub(crate) fn validate_sorted<T, F>(tree: &TreeCore<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut previous: Option<&T> = None;
    for (index, element) in tree.iter().enumerate() {
        if let Some(previous) = previous {
            assert_ne!(
                compare(previous, element),
                Ordering::Greater,
                "elements {} and {index} are out of order",
                index - 1
            );
        }
        previous = Some(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{BranchingFactor, TreeList};
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Operation {
        Insert(usize, i32),
        RemoveAt(usize),
        Set(usize, i32),
    }

    fn operation() -> impl Strategy<Value = Operation> {
        prop_oneof![
            3 => (any::<usize>(), any::<i32>()).prop_map(|(index, value)| Operation::Insert(index, value)),
            2 => any::<usize>().prop_map(Operation::RemoveAt),
            1 => (any::<usize>(), any::<i32>()).prop_map(|(index, value)| Operation::Set(index, value)),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_vec_model(
            branching_factor in 4usize..9,
            initial in prop::collection::vec(any::<i32>(), 0..200),
            operations in prop::collection::vec(operation(), 0..200),
        ) {
            let mut list = TreeList::with_branching_factor(BranchingFactor::new(branching_factor).unwrap());
            list.extend(initial.iter().copied());
            let mut model = initial;

            for operation in operations {
                match operation {
                    Operation::Insert(index, value) => {
                        let index = index % (model.len() + 1);
                        list.insert(index, value).unwrap();
                        model.insert(index, value);
                    }
                    Operation::RemoveAt(index) if !model.is_empty() => {
                        let index = index % model.len();
                        prop_assert_eq!(list.remove_at(index).unwrap(), model.remove(index));
                    }
                    Operation::Set(index, value) if !model.is_empty() => {
                        let index = index % model.len();
                        prop_assert_eq!(list.set(index, value).unwrap(), std::mem::replace(&mut model[index], value));
                    }
                    _ => {}
                }
                validate(list.core());
            }

            prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), model);
        }

        #[test]
        fn prop_drain_from_front_and_back_stays_balanced(
            length in 0usize..300,
            from_front in any::<bool>(),
        ) {
            let mut list = TreeList::with_branching_factor(BranchingFactor::new(4).unwrap());
            list.extend(0..length);
            while !list.is_empty() {
                let index = if from_front { 0 } else { list.len() - 1 };
                list.remove_at(index).unwrap();
                validate(list.core());
            }
            prop_assert_eq!(list.core().height(), 1);
        }
    }
}
