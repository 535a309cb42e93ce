//! Predicate filtering.

use crate::error::StreamError;
use crate::stream::Stream;

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Keep entries for which `predicate(value, key)` holds.
    #[must_use]
    pub fn filter<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(&V, &K) -> bool + 'a,
    {
        self.stage("filter", move |upstream| {
            upstream.filter(move |entry| match entry {
                Ok((key, value)) => predicate(value, key),
                Err(_) => true,
            })
        })
    }

    /// Fallible filter. An `Err` from the predicate ends the stream with
    /// [`StreamError::Callback`].
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// let mut s = Stream::from_values(vec!["1", "x", "3"])
    ///     .try_filter(|v, _k| Ok(v.parse::<i32>()? > 0));
    ///
    /// let mut it = s.iter().unwrap();
    /// assert_eq!(it.next().unwrap().unwrap(), (0, "1"));
    /// assert!(it.next().unwrap().is_err());
    /// assert!(it.next().is_none());
    /// ```
    #[must_use]
    pub fn try_filter<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(&V, &K) -> anyhow::Result<bool> + 'a,
    {
        self.stage("filter", move |upstream| {
            upstream.filter_map(move |entry| match entry {
                Ok((key, value)) => match predicate(&value, &key) {
                    Ok(true) => Some(Ok((key, value))),
                    Ok(false) => None,
                    Err(err) => Some(Err(StreamError::callback(err))),
                },
                Err(err) => Some(Err(err)),
            })
        })
    }
}
