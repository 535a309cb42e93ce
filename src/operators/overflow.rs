//! Capacity guard.

use crate::error::{Result, StreamError};
use crate::stream::Stream;

/// Yields up to `capacity` entries; pulling one more is an error.
pub struct Overflow<I, F> {
    upstream: I,
    capacity: usize,
    count: usize,
    on_exceed: Option<F>,
}

impl<T, I, F> Iterator for Overflow<I, F>
where
    I: Iterator<Item = Result<T>>,
    F: FnOnce(usize) -> StreamError,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.on_exceed.as_ref()?;
        match self.upstream.next()? {
            Ok(_) if self.count >= self.capacity => {
                let on_exceed = self.on_exceed.take()?;
                Some(Err(on_exceed(self.capacity)))
            }
            Ok(entry) => {
                self.count += 1;
                Some(Ok(entry))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Fail with [`StreamError::Overflow`] when more than `capacity` entries
    /// arrive. The first `capacity` entries are yielded normally.
    ///
    /// # Example
    /// ```
    /// use datastream::{Stream, StreamError};
    ///
    /// let mut s = Stream::from_values(vec![1, 2, 3]).overflow(2);
    /// let mut it = s.iter().unwrap();
    /// assert!(it.next().unwrap().is_ok());
    /// assert!(it.next().unwrap().is_ok());
    /// assert!(matches!(it.next(), Some(Err(StreamError::Overflow { capacity: 2 }))));
    /// ```
    #[must_use]
    pub fn overflow(self, capacity: usize) -> Self {
        self.overflow_error(capacity, StreamError::overflow)
    }

    /// Like [`overflow`](Self::overflow) with a custom error built from the
    /// capacity.
    #[must_use]
    pub fn overflow_error<F>(self, capacity: usize, on_exceed: F) -> Self
    where
        F: FnOnce(usize) -> StreamError + 'a,
    {
        self.stage("overflow", move |upstream| Overflow {
            upstream,
            capacity,
            count: 0,
            on_exceed: Some(on_exceed),
        })
    }
}
