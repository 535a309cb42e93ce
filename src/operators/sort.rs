//! Stable sorting by value or by key. Materializes the whole upstream.

use super::deferred;
use crate::error::Result;
use crate::stream::Stream;
use std::cmp::Ordering;
use tracing::debug;

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    fn sorted_by<F>(self, mut cmp: F) -> Self
    where
        F: FnMut(&(K, V), &(K, V)) -> Ordering + 'a,
    {
        self.stage("sort", |upstream| {
            deferred(move || {
                let mut entries = upstream.collect::<Result<Vec<_>>>()?;
                entries.sort_by(&mut cmp);
                debug!(stage = "sort", entries = entries.len(), "materialized upstream");
                Ok(entries.into_iter().map(Ok))
            })
        })
    }

    /// Sort by value, natural order.
    #[must_use]
    pub fn sort(self) -> Self
    where
        V: Ord,
    {
        self.sorted_by(|a, b| a.1.cmp(&b.1))
    }

    /// Sort by value with a comparator. Equal values keep their upstream order.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let mut s = Stream::from_entries(vec![("a", 3), ("b", 1), ("c", 3)]).sort_by(|x, y| y.cmp(x));
    /// assert_eq!(s.to_vec()?, vec![("a", 3), ("c", 3), ("b", 1)]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn sort_by<F>(self, mut cmp: F) -> Self
    where
        F: FnMut(&V, &V) -> Ordering + 'a,
    {
        self.sorted_by(move |a, b| cmp(&a.1, &b.1))
    }

    /// Sort by key, natural order.
    #[must_use]
    pub fn sort_keys(self) -> Self
    where
        K: Ord,
    {
        self.sorted_by(|a, b| a.0.cmp(&b.0))
    }

    /// Sort by key with a comparator.
    #[must_use]
    pub fn sort_keys_by<F>(self, mut cmp: F) -> Self
    where
        F: FnMut(&K, &K) -> Ordering + 'a,
    {
        self.sorted_by(move |a, b| cmp(&a.0, &b.0))
    }
}
