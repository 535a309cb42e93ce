//! Value and key transforms.

use crate::error::{Result, StreamError};
use crate::stream::Stream;

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Transform values, keeping keys.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let mut s = Stream::from_entries(vec![("a", 1), ("b", 2)]).map(|v, k| format!("{k}{v}"));
    /// assert_eq!(s.to_values()?, vec!["a1", "b2"]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn map<V2, F>(self, mut transform: F) -> Stream<'a, K, V2>
    where
        V2: 'a,
        F: FnMut(V, &K) -> V2 + 'a,
    {
        self.stage("map", move |upstream| {
            upstream.map(move |entry| {
                entry.map(|(key, value)| {
                    let value = transform(value, &key);
                    (key, value)
                })
            })
        })
    }

    /// Transform keys, keeping values.
    #[must_use]
    pub fn map_keys<K2, F>(self, mut transform: F) -> Stream<'a, K2, V>
    where
        K2: 'a,
        F: FnMut(K, &V) -> K2 + 'a,
    {
        self.stage("map", move |upstream| {
            upstream.map(move |entry| {
                entry.map(|(key, value)| {
                    let key = transform(key, &value);
                    (key, value)
                })
            })
        })
    }

    /// Transform values and keys; both closures see the original entry.
    #[must_use]
    pub fn map_both<K2, V2, FV, FK>(self, mut value_fn: FV, mut key_fn: FK) -> Stream<'a, K2, V2>
    where
        K2: 'a,
        V2: 'a,
        FV: FnMut(&V, &K) -> V2 + 'a,
        FK: FnMut(&K, &V) -> K2 + 'a,
    {
        self.stage("map", move |upstream| {
            upstream.map(move |entry| {
                entry.map(|(key, value)| (key_fn(&key, &value), value_fn(&value, &key)))
            })
        })
    }

    /// Same-typed transform where either side may be omitted.
    ///
    /// An omitted side is kept as is. With both sides omitted the stage yields
    /// a [`StreamError::Logic`] on its first pull.
    #[must_use]
    pub fn map_optional<FV, FK>(self, value_fn: Option<FV>, key_fn: Option<FK>) -> Self
    where
        FV: FnMut(&V, &K) -> V + 'a,
        FK: FnMut(&K, &V) -> K + 'a,
    {
        self.stage("map", move |upstream| MapOptional {
            upstream,
            value_fn,
            key_fn,
        })
    }

    /// Fallible value transform. An `Err` ends the stream with
    /// [`StreamError::Callback`].
    #[must_use]
    pub fn try_map<V2, F>(self, mut transform: F) -> Stream<'a, K, V2>
    where
        V2: 'a,
        F: FnMut(V, &K) -> anyhow::Result<V2> + 'a,
    {
        self.stage("map", move |upstream| {
            upstream.map(move |entry| -> Result<(K, V2)> {
                let (key, value) = entry?;
                let value = transform(value, &key).map_err(StreamError::callback)?;
                Ok((key, value))
            })
        })
    }
}

struct MapOptional<I, FV, FK> {
    upstream: I,
    value_fn: Option<FV>,
    key_fn: Option<FK>,
}

impl<K, V, I, FV, FK> Iterator for MapOptional<I, FV, FK>
where
    I: Iterator<Item = Result<(K, V)>>,
    FV: FnMut(&V, &K) -> V,
    FK: FnMut(&K, &V) -> K,
{
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.value_fn.is_none() && self.key_fn.is_none() {
            return Some(Err(StreamError::logic(
                "Map requires a value transform, a key transform, or both.",
            )));
        }
        let (key, value) = match self.upstream.next()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(err)),
        };
        let new_key = self.key_fn.as_mut().map(|f| f(&key, &value));
        let new_value = self.value_fn.as_mut().map(|f| f(&value, &key));
        Some(Ok((new_key.unwrap_or(key), new_value.unwrap_or(value))))
    }
}
