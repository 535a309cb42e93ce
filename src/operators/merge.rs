//! Concatenation of two sources.

use crate::source::Source;
use crate::stream::Stream;

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// All entries of `self`, then all entries of `other`. Keys are not
    /// deduplicated. Aggregators of both sides are visible downstream.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let mut s = Stream::from_entries(vec![("a", 1)]).merge(vec![("a", 2), ("b", 3)]);
    /// assert_eq!(s.upstreams().len(), 2);
    /// assert_eq!(s.to_vec()?, vec![("a", 1), ("a", 2), ("b", 3)]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn merge<S: Source<'a, K, V>>(self, other: S) -> Self {
        self.stage2(other.into_stream(), "merge", |first, second| first.chain(second))
    }
}
