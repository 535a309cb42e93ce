//! Bounded prefixes: `take` and `take_until`.

use crate::error::Result;
use crate::stream::Stream;

/// Yields at most `n` entries and never pulls past the `n`-th.
pub struct Take<I> {
    upstream: I,
    remaining: usize,
}

impl<I> Take<I> {
    pub(crate) const fn new(upstream: I, n: usize) -> Self {
        Self {
            upstream,
            remaining: n,
        }
    }
}

impl<T, I: Iterator<Item = Result<T>>> Iterator for Take<I> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.upstream.next()?;
        if entry.is_ok() {
            self.remaining -= 1;
        }
        Some(entry)
    }
}

/// Yields entries until the predicate matches; the matching entry is dropped
/// and nothing further is pulled.
pub struct TakeUntil<I, F> {
    upstream: I,
    predicate: F,
    done: bool,
}

impl<K, V, I, F> Iterator for TakeUntil<I, F>
where
    I: Iterator<Item = Result<(K, V)>>,
    F: FnMut(&V, &K) -> bool,
{
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.upstream.next()? {
            Ok((key, value)) if (self.predicate)(&value, &key) => {
                self.done = true;
                None
            }
            entry => Some(entry),
        }
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// First `n` entries.
    ///
    /// # Example
    /// ```
    /// use datastream::testing::PullCounter;
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let counter = PullCounter::new();
    /// let mut s = counter.wrap(Stream::from_values(1..)).take(3);
    ///
    /// assert_eq!(s.to_values()?, vec![1, 2, 3]);
    /// assert_eq!(counter.pulls(), 3);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn take(self, n: usize) -> Self {
        self.stage("take", move |upstream| Take::new(upstream, n))
    }

    /// Entries before the first one matching `predicate(value, key)`.
    #[must_use]
    pub fn take_until<F>(self, predicate: F) -> Self
    where
        F: FnMut(&V, &K) -> bool + 'a,
    {
        self.stage("take_until", move |upstream| TakeUntil {
            upstream,
            predicate,
            done: false,
        })
    }
}
