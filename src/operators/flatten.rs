//! Flattening nested sources.

use crate::error::Result;
use crate::source::Source;
use crate::stream::{Stream, StreamIter};

/// Yields every entry of every inner source, in order.
pub struct Flatten<'a, I, K, V> {
    outer: I,
    inner: Option<StreamIter<'a, K, V>>,
}

impl<'a, OK, OV, I, K, V> Iterator for Flatten<'a, I, K, V>
where
    I: Iterator<Item = Result<(OK, OV)>>,
    OV: Source<'a, K, V>,
    K: 'a,
    V: 'a,
{
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if let Some(entry) = inner.next() {
                    return Some(entry);
                }
                self.inner = None;
            }
            match self.outer.next()? {
                Ok((_, nested)) => self.inner = Some(nested.into_stream().into_iter()),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Yield the entries of each nested value, re-keyed from 0.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let mut s = Stream::from_values(vec![vec![("x", 1), ("y", 2)], vec![("x", 3)]]).flatten();
    /// assert_eq!(s.to_vec()?, vec![(0, 1), (1, 2), (2, 3)]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn flatten<K2, V2>(self) -> Stream<'a, usize, V2>
    where
        K2: 'a,
        V2: 'a,
        V: Source<'a, K2, V2>,
    {
        self.stage("flatten", |outer| {
            Flatten { outer, inner: None }
                .enumerate()
                .map(|(index, entry)| entry.map(|(_, value): (K2, V2)| (index, value)))
        })
    }

    /// Yield the entries of each nested value with their own keys.
    ///
    /// Keys are not deduplicated across nested values.
    #[must_use]
    pub fn flatten_keyed<K2, V2>(self) -> Stream<'a, K2, V2>
    where
        K2: 'a,
        V2: 'a,
        V: Source<'a, K2, V2>,
    {
        self.stage("flatten", |outer| Flatten { outer, inner: None })
    }
}
