//! Integration tests for SortedTreeDictionary.

use rstest::rstest;
use treelist::error::CollectionError;
use treelist::sorted::{SortedTreeDictionary, shared};

fn sample() -> SortedTreeDictionary<i32, &'static str> {
    [(3, "three"), (1, "one"), (2, "two")].into_iter().collect()
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[rstest]
fn test_entries_iterate_in_key_order() {
    let dictionary = sample();
    assert_eq!(
        dictionary.iter().collect::<Vec<_>>(),
        vec![(&1, &"one"), (&2, &"two"), (&3, &"three")]
    );
    assert_eq!(dictionary.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(dictionary.values().copied().collect::<Vec<_>>(), vec!["one", "two", "three"]);
}

#[rstest]
#[case(1, Some("one"))]
#[case(3, Some("three"))]
#[case(0, None)]
#[case(4, None)]
fn test_get(#[case] key: i32, #[case] expected: Option<&str>) {
    assert_eq!(sample().get(&key).copied(), expected);
}

#[rstest]
fn test_contains() {
    let dictionary = sample();
    assert!(dictionary.contains_key(&2));
    assert!(!dictionary.contains_key(&5));
    assert!(dictionary.contains_value(&"three"));
    assert!(!dictionary.contains_value(&"four"));
}

#[rstest]
fn test_get_key_value_returns_stored_key() {
    let case_insensitive = shared(|left: &String, right: &String| {
        left.to_lowercase().cmp(&right.to_lowercase())
    });
    let dictionary = SortedTreeDictionary::by_comparer(case_insensitive).insert("Alpha".to_string(), 1);
    let (key, value) = dictionary.get_key_value(&"ALPHA".to_string()).unwrap();
    assert_eq!(key, "Alpha");
    assert_eq!(*value, 1);
}

// =============================================================================
// Edit Tests
// =============================================================================

#[rstest]
fn test_insert_replaces_value() {
    let dictionary = sample();
    let updated = dictionary.insert(2, "TWO");
    assert_eq!(updated.get(&2), Some(&"TWO"));
    assert_eq!(updated.len(), 3);
    assert_eq!(dictionary.get(&2), Some(&"two"));
}

#[rstest]
fn test_try_add_rejects_duplicate_key() {
    let dictionary = sample();
    assert!(matches!(
        dictionary.try_add(1, "uno"),
        Err(CollectionError::InvalidArgument { parameter: "key", .. })
    ));
    let extended = dictionary.try_add(4, "four").unwrap();
    assert_eq!(extended.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}

#[rstest]
fn test_insert_range_last_write_wins() {
    let dictionary = SortedTreeDictionary::new().insert_range([(5, 'a'), (1, 'b'), (5, 'c')]);
    assert_eq!(dictionary.len(), 2);
    assert_eq!(dictionary.get(&5), Some(&'c'));
}

#[rstest]
fn test_remove() {
    let dictionary = sample();
    let removed = dictionary.remove(&2);
    assert_eq!(removed.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(removed.remove(&2), removed);
    assert!(dictionary.clear().is_empty());
    assert_eq!(dictionary.len(), 3);
}

#[rstest]
fn test_many_entries() {
    let mut dictionary = SortedTreeDictionary::new();
    for key in (0..300).rev() {
        dictionary = dictionary.insert(key, key * 2);
    }
    assert_eq!(dictionary.len(), 300);
    assert!((0..300).all(|key| dictionary.get(&key) == Some(&(key * 2))));
}

// =============================================================================
// Comparer Tests
// =============================================================================

#[rstest]
fn test_with_comparer_reorders_and_keeps_first_collision() {
    let dictionary: SortedTreeDictionary<i32, char> =
        [(-2, 'a'), (1, 'b'), (2, 'c')].into_iter().collect();
    let by_magnitude = dictionary.with_comparer(shared(|left: &i32, right: &i32| left.abs().cmp(&right.abs())));

    assert_eq!(by_magnitude.iter().collect::<Vec<_>>(), vec![(&1, &'b'), (&-2, &'a')]);
    assert_eq!(by_magnitude.get(&2), Some(&'a'));
}

#[rstest]
fn test_debug_formats_as_map() {
    let dictionary = SortedTreeDictionary::new().insert(1, "one");
    assert_eq!(format!("{dictionary:?}"), r#"{1: "one"}"#);
}
