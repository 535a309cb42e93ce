//! Materialized batches produced by `buffer_count` and `buffer_while`.
//!
//! A [`Buffer`] is a finite, ordered, read-only run of entries taken from one
//! stretch of the upstream. Each batch is built fresh; once yielded it belongs
//! to the consumer and can be cloned, re-streamed or serialized.

use crate::item::Item;
use crate::stream::Stream;
use serde::Serialize;

/// Number of entries per batch used by [`Stream::buffer_count_default`].
pub const DEFAULT_BUFFER_SIZE: usize = 1000;

/// An immutable batch of `(K, V)` entries.
///
/// # Example
/// ```
/// use datastream::Stream;
///
/// # fn main() -> datastream::Result<()> {
/// let buffers = Stream::from_entries(vec![("a", 1), ("b", 2), ("c", 3)])
///     .buffer_count(2)
///     .to_values()?;
///
/// assert_eq!(buffers[0].keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
/// assert_eq!(buffers[1].first().map(|item| *item.key()), Some(&"c"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Buffer<K, V> {
    items: Vec<(K, V)>,
}

impl<K, V> Buffer<K, V> {
    pub(crate) fn from_entry(key: K, value: V) -> Self {
        Self {
            items: vec![(key, value)],
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, key: K, value: V) {
        self.items.push((key, value));
    }

    /// First entry, if any.
    #[must_use]
    pub fn first(&self) -> Option<Item<&K, &V>> {
        self.items.first().map(|(k, v)| Item::new(k, v))
    }

    /// Last entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<Item<&K, &V>> {
        self.items.last().map(|(k, v)| Item::new(k, v))
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.iter().map(|(k, _)| k)
    }

    /// Values in order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.items.iter().map(|(_, v)| v)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the buffer holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrowing iterator over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.items.iter()
    }

    /// The entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[(K, V)] {
        &self.items
    }

    /// Take the entries out of the buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<(K, V)> {
        self.items
    }

    /// Re-stream the buffer's entries through a fresh pipeline.
    pub fn stream<'a>(self) -> Stream<'a, K, V>
    where
        K: 'a,
        V: 'a,
    {
        Stream::from_entries(self.items)
    }
}

impl<K, V> IntoIterator for Buffer<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'b, K, V> IntoIterator for &'b Buffer<K, V> {
    type Item = &'b (K, V);
    type IntoIter = std::slice::Iter<'b, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
