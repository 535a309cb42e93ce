//! Fluent builders for test entries.

/// A fluent builder for `(key, value)` entry lists.
///
/// # Example
///
/// ```
/// use datastream::testing::EntriesBuilder;
///
/// let entries = EntriesBuilder::new()
///     .add("a", 1)
///     .add_values_for("b", vec![2, 3])
///     .build();
///
/// assert_eq!(entries, vec![("a", 1), ("b", 2), ("b", 3)]);
/// ```
#[derive(Clone, Debug)]
pub struct EntriesBuilder<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for EntriesBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EntriesBuilder<K, V> {
    /// Create an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one entry.
    #[must_use]
    pub fn add(mut self, key: K, value: V) -> Self {
        self.entries.push((key, value));
        self
    }

    /// Add several entries.
    #[must_use]
    pub fn add_entries(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Add one entry per value, all under `key`.
    #[must_use]
    pub fn add_values_for(mut self, key: K, values: Vec<V>) -> Self
    where
        K: Clone,
    {
        self.entries
            .extend(values.into_iter().map(|v| (key.clone(), v)));
        self
    }

    /// Build the entry list.
    #[must_use]
    pub fn build(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<V> EntriesBuilder<usize, V> {
    /// Add values keyed by their position in the list.
    #[must_use]
    pub fn add_indexed(mut self, values: impl IntoIterator<Item = V>) -> Self {
        let start = self.entries.len();
        self.entries
            .extend(values.into_iter().enumerate().map(|(i, v)| (start + i, v)));
        self
    }
}

/// Entries `(prefix_i, i)` for `i` in `start..end`.
///
/// # Example
///
/// ```
/// use datastream::testing::sequential_entries;
///
/// assert_eq!(
///     sequential_entries("k", 0, 2),
///     vec![("k_0".to_string(), 0), ("k_1".to_string(), 1)]
/// );
/// ```
#[must_use]
pub fn sequential_entries(prefix: &str, start: i32, end: i32) -> Vec<(String, i32)> {
    (start..end).map(|i| (format!("{prefix}_{i}"), i)).collect()
}
