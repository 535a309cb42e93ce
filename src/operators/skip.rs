//! Dropping a prefix.

use crate::error::Result;
use crate::stream::Stream;

/// Discards the first `n` entries, yields the rest.
pub struct Skip<I> {
    upstream: I,
    remaining: usize,
}

impl<T, I: Iterator<Item = Result<T>>> Iterator for Skip<I> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            match self.upstream.next()? {
                Ok(_) => self.remaining -= 1,
                Err(err) => return Some(Err(err)),
            }
        }
        self.upstream.next()
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Skip the first `n` entries.
    #[must_use]
    pub fn skip(self, n: usize) -> Self {
        self.stage("skip", move |upstream| Skip {
            upstream,
            remaining: n,
        })
    }
}
