//! Boundary tests for `copy_to` across every collection that offers it.

use rstest::rstest;
use treelist::error::CollectionError;
use treelist::persistent::PersistentTreeList;
use treelist::sorted::SortedTreeList;
use treelist::tree::TreeList;

fn ten_distinct() -> TreeList<i32> {
    [10, 7, 3, 9, 1, 8, 2, 6, 4, 5].into_iter().collect()
}

// =============================================================================
// Rejected Destinations
// =============================================================================

#[rstest]
fn test_destination_too_short() {
    let mut destination = [0; 1];
    assert!(matches!(
        ten_distinct().copy_to(Some(&mut destination), 0),
        Err(CollectionError::InvalidArgument { .. })
    ));
    assert_eq!(destination, [0]);
}

#[rstest]
#[case(20)]
#[case(300)]
fn test_destination_index_leaves_no_room(#[case] destination_index: isize) {
    let mut destination = [0; 20];
    assert!(matches!(
        ten_distinct().copy_to(Some(&mut destination), destination_index),
        Err(CollectionError::InvalidArgument { .. })
    ));
    assert_eq!(destination, [0; 20]);
}

#[rstest]
fn test_negative_destination_index() {
    let mut destination = [0; 20];
    assert!(matches!(
        ten_distinct().copy_to(Some(&mut destination), -1),
        Err(CollectionError::ArgumentOutOfRange {
            parameter: "destination_index",
            value: -1,
            ..
        })
    ));
}

#[rstest]
fn test_missing_destination() {
    assert_eq!(
        ten_distinct().copy_to(None, 0),
        Err(CollectionError::NullArgument { parameter: "destination" })
    );
}

#[rstest]
fn test_missing_destination_wins_over_bad_index() {
    assert!(matches!(
        ten_distinct().copy_to(None, -1),
        Err(CollectionError::NullArgument { .. })
    ));
}

// =============================================================================
// Accepted Destinations
// =============================================================================

#[rstest]
#[case(0)]
#[case(5)]
#[case(10)]
fn test_copy_fits(#[case] destination_index: usize) {
    let list = ten_distinct();
    let mut destination = [0; 20];
    list.copy_to(Some(&mut destination), isize::try_from(destination_index).unwrap())
        .unwrap();

    let copied = &destination[destination_index..destination_index + 10];
    assert_eq!(copied, list.iter().copied().collect::<Vec<_>>().as_slice());
    assert!(destination[..destination_index].iter().all(|&value| value == 0));
}

#[rstest]
fn test_empty_list_copies_to_end_of_destination() {
    let empty: TreeList<i32> = TreeList::new();
    let mut destination = [0; 3];
    assert_eq!(empty.copy_to(Some(&mut destination), 3), Ok(()));
}

#[rstest]
fn test_copy_range() {
    let list: TreeList<i32> = (0..100).collect();
    let mut destination = [0; 4];
    list.copy_range_to(40, Some(&mut destination), 0, 4).unwrap();
    assert_eq!(destination, [40, 41, 42, 43]);

    assert!(list.copy_range_to(98, Some(&mut destination), 0, 4).is_err());
}

// =============================================================================
// Other Collections
// =============================================================================

#[rstest]
fn test_persistent_list_shares_contract() {
    let list: PersistentTreeList<i32> = ten_distinct().iter().copied().collect();
    let mut destination = [0; 10];
    assert_eq!(list.copy_to(Some(&mut destination), 0), Ok(()));
    assert!(list.copy_to(Some(&mut destination), 1).is_err());
    assert!(list.copy_to(None, 0).is_err());
}

#[rstest]
fn test_sorted_list_copies_in_order() {
    let list: SortedTreeList<i32> = ten_distinct().iter().copied().collect();
    let mut destination = [0; 10];
    list.copy_to(Some(&mut destination), 0).unwrap();
    assert_eq!(destination, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
}
