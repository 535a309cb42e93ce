//! First occurrence of each distinct value.

use crate::error::Result;
use crate::stream::Stream;
use std::collections::HashSet;
use std::hash::Hash;

/// Yields an entry only the first time its identity is seen.
///
/// Remembers every identity seen so far; memory grows with the number of
/// distinct identities.
pub struct Distinct<I, F, T> {
    upstream: I,
    identity: F,
    seen: HashSet<T>,
}

impl<K, V, I, F, T> Iterator for Distinct<I, F, T>
where
    I: Iterator<Item = Result<(K, V)>>,
    F: FnMut(&V, &K) -> T,
    T: Eq + Hash,
{
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.upstream.next()? {
                Ok((key, value)) => {
                    if self.seen.insert((self.identity)(&value, &key)) {
                        return Some(Ok((key, value)));
                    }
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Drop entries whose value was already seen.
    #[must_use]
    pub fn distinct(self) -> Self
    where
        V: Eq + Hash + Clone,
    {
        self.distinct_by(|value: &V, _key: &K| value.clone())
    }

    /// Drop entries whose `identity(value, key)` was already seen.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let mut s = Stream::from_entries(vec![("a", vec![2]), ("b", vec![10]), ("c", vec![2]), ("d", vec![10])])
    ///     .distinct_by(|v, _k| v[0].to_string());
    ///
    /// assert_eq!(s.to_vec()?, vec![("a", vec![2]), ("b", vec![10])]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn distinct_by<T, F>(self, identity: F) -> Self
    where
        T: Eq + Hash + 'a,
        F: FnMut(&V, &K) -> T + 'a,
    {
        self.stage("distinct", move |upstream| Distinct {
            upstream,
            identity,
            seen: HashSet::new(),
        })
    }
}
