//! Integration tests for TreeList.

use rstest::rstest;
use treelist::error::CollectionError;
use treelist::tree::{BranchingFactor, TreeList};

fn small_list(range: std::ops::Range<i32>) -> TreeList<i32> {
    let mut list = TreeList::with_branching_factor(BranchingFactor::new(4).unwrap());
    list.extend(range);
    list
}

fn contents(list: &TreeList<i32>) -> Vec<i32> {
    list.iter().copied().collect()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_list() {
    let list: TreeList<i32> = TreeList::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert_eq!(list.get(0), None);
    assert_eq!(list.branching_factor(), BranchingFactor::DEFAULT);
}

#[rstest]
fn test_from_iterator_preserves_order() {
    let list: TreeList<i32> = (0..500).collect();
    assert_eq!(list.len(), 500);
    assert_eq!(contents(&list), (0..500).collect::<Vec<_>>());
}

// =============================================================================
// Positional Edit Tests
// =============================================================================

#[rstest]
#[case(0)]
#[case(17)]
#[case(50)]
#[case(100)]
fn test_insert_at_position(#[case] index: usize) {
    let mut list = small_list(0..100);
    list.insert(index, -1).unwrap();

    let mut expected: Vec<i32> = (0..100).collect();
    expected.insert(index, -1);
    assert_eq!(contents(&list), expected);
}

#[rstest]
fn test_insert_past_end_is_rejected_without_change() {
    let mut list = small_list(0..10);
    let error = list.insert(11, 0).unwrap_err();
    assert!(matches!(error, CollectionError::ArgumentOutOfRange { parameter: "index", .. }));
    assert_eq!(contents(&list), (0..10).collect::<Vec<_>>());
}

#[rstest]
fn test_insert_into_middle_repeatedly() {
    let mut list = small_list(0..0);
    let mut model = Vec::new();
    for value in 0..300 {
        let index = model.len() / 2;
        list.insert(index, value).unwrap();
        model.insert(index, value);
    }
    assert_eq!(contents(&list), model);
}

#[rstest]
fn test_remove_at_returns_removed_value() {
    let mut list = small_list(0..50);
    assert_eq!(list.remove_at(25), Ok(25));
    assert_eq!(list.remove_at(0), Ok(0));
    assert_eq!(list.remove_at(47), Ok(49));
    assert_eq!(list.len(), 47);
    assert!(list.remove_at(47).is_err());
}

#[rstest]
fn test_remove_everything_from_the_middle() {
    let mut list = small_list(0..200);
    while !list.is_empty() {
        let index = list.len() / 2;
        list.remove_at(index).unwrap();
    }
    assert_eq!(list.get(0), None);
    list.push(7);
    assert_eq!(contents(&list), vec![7]);
}

#[rstest]
fn test_remove_range() {
    let mut list = small_list(0..20);
    list.remove_range(5, 10).unwrap();
    assert_eq!(contents(&list), vec![0, 1, 2, 3, 4, 15, 16, 17, 18, 19]);

    assert!(matches!(
        list.remove_range(5, 6),
        Err(CollectionError::InvalidArgument { .. })
    ));
    assert_eq!(list.len(), 10);
}

#[rstest]
fn test_set_replaces_in_place() {
    let mut list = small_list(0..10);
    assert_eq!(list.set(3, 30), Ok(3));
    assert_eq!(list.get(3), Some(&30));
    assert!(list.set(10, 0).is_err());
}

#[rstest]
fn test_clear_keeps_branching_factor() {
    let mut list = small_list(0..100);
    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.branching_factor().get(), 4);
}

// =============================================================================
// Search Tests
// =============================================================================

#[rstest]
fn test_index_of_and_contains() {
    let list: TreeList<i32> = [3, 1, 4, 1, 5].into_iter().collect();
    assert_eq!(list.index_of(&1), Some(1));
    assert_eq!(list.index_of(&9), None);
    assert!(list.contains(&5));
    assert_eq!(list.index_of_by(&1, 2, 3, |left, right| left == right), Ok(Some(3)));
    assert!(list.index_of_by(&1, 4, 2, |left, right| left == right).is_err());
}

#[rstest]
#[case(0, Ok(0))]
#[case(20, Ok(10))]
#[case(21, Err(11))]
#[case(-5, Err(0))]
#[case(99, Err(50))]
fn test_binary_search(#[case] target: i32, #[case] expected: Result<usize, usize>) {
    let list: TreeList<i32> = (0..50).map(|value| value * 2).collect();
    assert_eq!(list.binary_search(&target), expected);
}

#[rstest]
fn test_binary_search_in_range() {
    let list: TreeList<i32> = (0..50).collect();
    assert_eq!(list.binary_search_in(10, 10, |element| element.cmp(&15)), Ok(Ok(15)));
    assert_eq!(list.binary_search_in(10, 10, |element| element.cmp(&40)), Ok(Err(20)));
    assert!(list.binary_search_in(45, 10, |element| element.cmp(&0)).is_err());
}

// =============================================================================
// Enumeration Tests
// =============================================================================

#[rstest]
fn test_iter_from_and_exact_size() {
    let list = small_list(0..40);
    let iterator = list.iter_from(30).unwrap();
    assert_eq!(iterator.len(), 10);
    assert_eq!(iterator.copied().collect::<Vec<_>>(), (30..40).collect::<Vec<_>>());
    assert_eq!(list.iter_from(40).unwrap().next(), None);
    assert!(list.iter_from(41).is_err());
}

#[rstest]
fn test_cursor_detects_structural_change() {
    let mut list = small_list(0..5);
    let mut cursor = list.cursor();
    assert_eq!(cursor.advance(&list), Ok(Some(&0)));
    assert_eq!(cursor.advance(&list), Ok(Some(&1)));

    list.set(4, 40).unwrap();
    assert_eq!(cursor.advance(&list), Ok(Some(&2)));

    list.remove_at(0).unwrap();
    assert_eq!(cursor.advance(&list), Err(CollectionError::CollectionModified));
}

#[rstest]
fn test_cursor_runs_to_end() {
    let list = small_list(0..3);
    let mut cursor = list.cursor();
    let mut seen = Vec::new();
    while let Some(value) = cursor.advance(&list).unwrap() {
        seen.push(*value);
    }
    assert_eq!(seen, vec![0, 1, 2]);
    assert_eq!(cursor.advance(&list), Ok(None));
}

#[rstest]
fn test_cursor_rejects_other_list() {
    let first = small_list(0..3);
    let second = first.clone();
    let mut cursor = first.cursor();
    assert!(matches!(
        cursor.advance(&second),
        Err(CollectionError::InvalidArgument { .. })
    ));
}

// =============================================================================
// Trait Tests
// =============================================================================

#[rstest]
fn test_clone_is_independent() {
    let original = small_list(0..100);
    let mut copy = original.clone();
    copy.insert(50, -1).unwrap();
    copy.remove_at(0).unwrap();

    assert_eq!(contents(&original), (0..100).collect::<Vec<_>>());
    assert_eq!(copy.len(), 100);
    assert_eq!(copy.get(49), Some(&-1));
}

#[rstest]
fn test_equality_ignores_shape() {
    let built_by_push: TreeList<i32> = (0..64).collect();
    let mut built_by_insert = small_list(0..0);
    for value in (0..64).rev() {
        built_by_insert.insert(0, value).unwrap();
    }
    assert_eq!(built_by_push, built_by_insert);
}

#[rstest]
fn test_debug_formats_as_list() {
    let list: TreeList<i32> = (1..=3).collect();
    assert_eq!(format!("{list:?}"), "[1, 2, 3]");
}
