//! Fallback for streams that produced nothing.

use crate::error::{Result, StreamError};
use crate::source::Source;
use crate::stream::{BoxedEntries, Stream};

type Fallback<'a, K, V> = Box<dyn FnOnce() -> BoxedEntries<'a, K, V> + 'a>;

/// Yields every upstream entry; if there were none, yields the fallback
/// instead.
pub struct IfEmpty<'a, I, K, V> {
    upstream: I,
    produced: bool,
    on_empty: Option<Fallback<'a, K, V>>,
    fallback: Option<BoxedEntries<'a, K, V>>,
}

impl<'a, I, K, V> Iterator for IfEmpty<'a, I, K, V>
where
    I: Iterator<Item = Result<(K, V)>>,
{
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(fallback) = self.fallback.as_mut() {
            return fallback.next();
        }
        match self.upstream.next() {
            Some(entry) => {
                self.produced |= entry.is_ok();
                Some(entry)
            }
            None if self.produced => None,
            None => {
                let on_empty = self.on_empty.take()?;
                self.fallback.insert(on_empty()).next()
            }
        }
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    fn or_else_with(self, on_empty: Fallback<'a, K, V>) -> Self {
        self.stage("if_empty", move |upstream| IfEmpty {
            upstream,
            produced: false,
            on_empty: Some(on_empty),
            fallback: None,
        })
    }

    /// Fail with [`StreamError::Empty`] if the upstream produced nothing.
    #[must_use]
    pub fn if_empty(self) -> Self {
        self.if_empty_error(StreamError::empty())
    }

    /// Fail with `err` if the upstream produced nothing.
    #[must_use]
    pub fn if_empty_error(self, err: StreamError) -> Self {
        self.or_else_with(Box::new(move || -> BoxedEntries<'a, K, V> {
            Box::new(std::iter::once(Err(err)))
        }))
    }

    /// Yield `fallback` if the upstream produced nothing. The fallback is not
    /// touched otherwise.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let mut s = Stream::from_entries(Vec::<(&str, i32)>::new()).if_empty_then(vec![("none", 0)]);
    /// assert_eq!(s.to_vec()?, vec![("none", 0)]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn if_empty_then<S: Source<'a, K, V>>(self, fallback: S) -> Self {
        let fallback = fallback.into_stream();
        self.or_else_with(Box::new(move || -> BoxedEntries<'a, K, V> {
            Box::new(fallback.into_iter())
        }))
    }

    /// Like [`if_empty_then`](Self::if_empty_then), but the fallback source
    /// is only built, by calling `factory`, once the upstream turned out empty.
    #[must_use]
    pub fn if_empty_with<F, S>(self, factory: F) -> Self
    where
        F: FnOnce() -> S + 'a,
        S: Source<'a, K, V>,
    {
        self.or_else_with(Box::new(move || -> BoxedEntries<'a, K, V> {
            Box::new(factory().into_stream().into_iter())
        }))
    }
}
