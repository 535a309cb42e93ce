//! Side effects on entries passing by.

use crate::stream::Stream;

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Call `f(value, key)` for every entry right before it is yielded.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    /// use std::cell::RefCell;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let seen = RefCell::new(Vec::new());
    /// let mut s = Stream::from_values(vec![1, 2]).tap(|v, _k| seen.borrow_mut().push(*v));
    /// s.flush()?;
    /// assert_eq!(*seen.borrow(), vec![1, 2]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn tap<F>(self, mut f: F) -> Self
    where
        F: FnMut(&V, &K) + 'a,
    {
        self.stage("tap", move |upstream| {
            upstream.inspect(move |entry| {
                if let Ok((key, value)) = entry {
                    f(value, key);
                }
            })
        })
    }
}
