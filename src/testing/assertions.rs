//! Assertion functions for drained stream output.

use std::fmt::Debug;

/// Assert that two entry lists are equal in order and content.
///
/// # Panics
///
/// Panics if the lists differ in length or content.
///
/// # Example
///
/// ```
/// use datastream::testing::assert_entries_equal;
///
/// assert_entries_equal(&[("a", 1), ("b", 2)], &[("a", 1), ("b", 2)]);
/// ```
pub fn assert_entries_equal<K, V>(actual: &[(K, V)], expected: &[(K, V)])
where
    K: Debug + PartialEq,
    V: Debug + PartialEq,
{
    assert_eq!(
        actual.len(),
        expected.len(),
        "Entry count mismatch:\n  Expected: {}\n  Actual: {}\n  Expected entries: {expected:?}\n  Actual entries: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            a == e,
            "Entry mismatch at position {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Expected entries: {expected:?}\n  Actual entries: {actual:?}"
        );
    }
}

/// Assert that the values of `actual` equal `expected`, in order. Keys are ignored.
///
/// # Panics
///
/// Panics if the values differ.
pub fn assert_values_equal<K, V>(actual: &[(K, V)], expected: &[V])
where
    V: Debug + PartialEq,
{
    let values: Vec<&V> = actual.iter().map(|(_, v)| v).collect();
    let expected: Vec<&V> = expected.iter().collect();
    assert_eq!(values, expected, "Value mismatch");
}

/// Assert that the keys of `actual` equal `expected`, in order. Values are ignored.
///
/// # Panics
///
/// Panics if the keys differ.
///
/// # Example
///
/// ```
/// use datastream::testing::assert_keys_equal;
///
/// assert_keys_equal(&[("a", 1), ("a", 2)], &["a", "a"]);
/// ```
pub fn assert_keys_equal<K, V>(actual: &[(K, V)], expected: &[K])
where
    K: Debug + PartialEq,
{
    let keys: Vec<&K> = actual.iter().map(|(k, _)| k).collect();
    let expected: Vec<&K> = expected.iter().collect();
    assert_eq!(keys, expected, "Key mismatch");
}

/// Assert that every entry satisfies `predicate(value, key)`.
///
/// # Panics
///
/// Panics on the first entry that fails the predicate.
pub fn assert_all<K: Debug, V: Debug>(actual: &[(K, V)], predicate: impl Fn(&V, &K) -> bool) {
    for (i, (k, v)) in actual.iter().enumerate() {
        assert!(
            predicate(v, k),
            "Entry at position {i} does not satisfy predicate: ({k:?}, {v:?})\n  All entries: {actual:?}"
        );
    }
}
