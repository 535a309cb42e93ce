//! Guaranteed cleanup.
//!
//! The finalizer runs once, at the first of:
//!
//! - the upstream reporting its end,
//! - an error passing through the stage,
//! - the stage being dropped after it was pulled at least once (a consumer
//!   abandoning the stream early, or a downstream error tearing it down).
//!
//! A stage that was never pulled never runs its finalizer.

use crate::error::Result;
use crate::stream::Stream;
use tracing::debug;

/// Iterator adapter running a cleanup closure exactly once.
pub struct Finalize<I, F: FnOnce()> {
    upstream: I,
    finalizer: Option<F>,
    pulled: bool,
}

impl<I, F: FnOnce()> Finalize<I, F> {
    pub(crate) const fn new(upstream: I, finalizer: F) -> Self {
        Self {
            upstream,
            finalizer: Some(finalizer),
            pulled: false,
        }
    }

    fn run(&mut self) {
        if let Some(finalizer) = self.finalizer.take() {
            debug!(stage = "finalize", "running finalizer");
            finalizer();
        }
    }
}

impl<T, I, F> Iterator for Finalize<I, F>
where
    I: Iterator<Item = Result<T>>,
    F: FnOnce(),
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pulled = true;
        match self.upstream.next() {
            Some(Ok(entry)) => Some(Ok(entry)),
            Some(Err(err)) => {
                self.run();
                Some(Err(err))
            }
            None => {
                self.run();
                None
            }
        }
    }
}

impl<I, F: FnOnce()> Drop for Finalize<I, F> {
    fn drop(&mut self) {
        if self.pulled {
            self.run();
        }
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Run `finalizer` once when this stage finishes, fails, or is abandoned.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    /// use std::cell::Cell;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let calls = Cell::new(0);
    /// let mut s = Stream::from_values(vec![1, 2, 3]).finalize(|| calls.set(calls.get() + 1));
    ///
    /// let mut it = s.iter()?;
    /// it.next();
    /// drop(it);
    /// assert_eq!(calls.get(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn finalize<F>(self, finalizer: F) -> Self
    where
        F: FnOnce() + 'a,
    {
        self.stage("finalize", move |upstream| Finalize::new(upstream, finalizer))
    }
}
