//! Batching into [`Buffer`]s: `buffer_count` and `buffer_while`.
//!
//! Both stages key their output by batch index, starting at 0.

use crate::buffer::{Buffer, DEFAULT_BUFFER_SIZE};
use crate::error::Result;
use crate::stream::Stream;
use std::mem::replace;

/// Yields a buffer every `size` entries, plus a trailing partial one.
pub struct BufferCount<I, K, V> {
    upstream: I,
    size: usize,
    current: Buffer<K, V>,
    index: usize,
}

impl<I, K, V> BufferCount<I, K, V> {
    fn emit(&mut self) -> (usize, Buffer<K, V>) {
        let full = replace(&mut self.current, Buffer::with_capacity(self.size));
        let index = self.index;
        self.index += 1;
        (index, full)
    }
}

impl<I, K, V> Iterator for BufferCount<I, K, V>
where
    I: Iterator<Item = Result<(K, V)>>,
{
    type Item = Result<(usize, Buffer<K, V>)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.upstream.next() {
                Some(Ok((key, value))) => {
                    self.current.push(key, value);
                    if self.current.len() == self.size {
                        return Some(Ok(self.emit()));
                    }
                }
                Some(Err(err)) => return Some(Err(err)),
                None if self.current.is_empty() => return None,
                None => return Some(Ok(self.emit())),
            }
        }
    }
}

/// Groups consecutive entries while a predicate accepts them.
pub struct BufferWhile<I, K, V, F> {
    upstream: I,
    predicate: F,
    current: Option<Buffer<K, V>>,
    index: usize,
}

impl<I, K, V, F> Iterator for BufferWhile<I, K, V, F>
where
    I: Iterator<Item = Result<(K, V)>>,
    F: FnMut(&Buffer<K, V>, &V, &K) -> bool,
{
    type Item = Result<(usize, Buffer<K, V>)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (key, value) = match self.upstream.next() {
                Some(Ok(entry)) => entry,
                Some(Err(err)) => return Some(Err(err)),
                None => {
                    let last = self.current.take()?;
                    return Some(Ok((self.index, last)));
                }
            };
            let Some(current) = self.current.as_mut() else {
                self.current = Some(Buffer::from_entry(key, value));
                continue;
            };
            if (self.predicate)(current, &value, &key) {
                current.push(key, value);
                continue;
            }
            let done = replace(current, Buffer::from_entry(key, value));
            let index = self.index;
            self.index += 1;
            return Some(Ok((index, done)));
        }
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Batch entries into buffers of `size`.
    ///
    /// The last buffer holds the remaining `1..size` entries, if any. An empty
    /// upstream yields no buffers.
    ///
    /// # Panics
    /// Panics if `size` is 0.
    #[must_use]
    pub fn buffer_count(self, size: usize) -> Stream<'a, usize, Buffer<K, V>> {
        assert!(size > 0, "buffer size must be positive");
        self.stage("buffer_count", move |upstream| BufferCount {
            upstream,
            size,
            current: Buffer::with_capacity(size),
            index: 0,
        })
    }

    /// [`buffer_count`](Self::buffer_count) with [`DEFAULT_BUFFER_SIZE`].
    #[must_use]
    pub fn buffer_count_default(self) -> Stream<'a, usize, Buffer<K, V>> {
        self.buffer_count(DEFAULT_BUFFER_SIZE)
    }

    /// Group consecutive entries into buffers.
    ///
    /// The first entry opens a buffer. Each following entry is offered to
    /// `predicate(buffer, value, key)` with the buffer as it is *before* the
    /// entry is added: `true` appends it, `false` yields the buffer and opens a
    /// new one with this entry.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let runs = Stream::from_entries(vec![("a", 2), ("b", 2), ("c", 3)])
    ///     .buffer_while(|buffer, value, _key| buffer.last().is_some_and(|last| last.value() == &value))
    ///     .to_values()?;
    ///
    /// assert_eq!(runs.len(), 2);
    /// assert_eq!(runs[0].keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn buffer_while<F>(self, predicate: F) -> Stream<'a, usize, Buffer<K, V>>
    where
        F: FnMut(&Buffer<K, V>, &V, &K) -> bool + 'a,
    {
        self.stage("buffer_while", move |upstream| BufferWhile {
            upstream,
            predicate,
            current: None,
            index: 0,
        })
    }
}
