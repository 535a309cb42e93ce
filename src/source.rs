//! Anything that can feed a [`Stream`].
//!
//! A [`Stream`] passed as a source is used directly, so its upstream stages
//! and aggregators carry over. Plain collections become a fresh `"source"`
//! stage with no upstreams and no aggregators.

use crate::buffer::Buffer;
use crate::stream::Stream;
use std::collections::{BTreeMap, HashMap};

/// Conversion into a lazy [`Stream`] of `(K, V)` entries.
pub trait Source<'a, K, V> {
    /// Turn `self` into a stream. Must not pull anything.
    fn into_stream(self) -> Stream<'a, K, V>;
}

impl<'a, K: 'a, V: 'a> Source<'a, K, V> for Stream<'a, K, V> {
    fn into_stream(self) -> Stream<'a, K, V> {
        self
    }
}

impl<'a, K: 'a, V: 'a> Source<'a, K, V> for Vec<(K, V)> {
    fn into_stream(self) -> Stream<'a, K, V> {
        Stream::from_entries(self)
    }
}

impl<'a, K: 'a, V: 'a, const N: usize> Source<'a, K, V> for [(K, V); N] {
    fn into_stream(self) -> Stream<'a, K, V> {
        Stream::from_entries(self)
    }
}

impl<'a, K: 'a, V: 'a> Source<'a, K, V> for BTreeMap<K, V> {
    fn into_stream(self) -> Stream<'a, K, V> {
        Stream::from_entries(self)
    }
}

/// Iteration order follows the map's own (unspecified) order.
impl<'a, K: 'a, V: 'a, S: 'a> Source<'a, K, V> for HashMap<K, V, S> {
    fn into_stream(self) -> Stream<'a, K, V> {
        Stream::from_entries(self)
    }
}

impl<'a, K: 'a, V: 'a> Source<'a, K, V> for Buffer<K, V> {
    fn into_stream(self) -> Stream<'a, K, V> {
        self.stream()
    }
}

impl<'a, K: Clone + 'a, V: Clone + 'a> Source<'a, K, V> for &'a [(K, V)] {
    fn into_stream(self) -> Stream<'a, K, V> {
        Stream::from_entries(self.iter().cloned())
    }
}

/// Adapter turning any iterator of `(K, V)` pairs into a [`Source`].
///
/// ```
/// use datastream::source::Entries;
/// use datastream::Stream;
///
/// # fn main() -> datastream::Result<()> {
/// let pairs = ["x", "y"].into_iter().map(|k| (k, k.len()));
/// assert_eq!(Stream::new(Entries(pairs)).to_vec()?, vec![("x", 1), ("y", 1)]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Entries<I>(pub I);

impl<'a, K: 'a, V: 'a, I> Source<'a, K, V> for Entries<I>
where
    I: IntoIterator<Item = (K, V)>,
    I::IntoIter: 'a,
{
    fn into_stream(self) -> Stream<'a, K, V> {
        Stream::from_entries(self.0)
    }
}

/// Adapter turning any iterator of values into a [`Source`] keyed from 0.
#[derive(Clone, Debug)]
pub struct Values<I>(pub I);

impl<'a, V: 'a, I> Source<'a, usize, V> for Values<I>
where
    I: IntoIterator<Item = V>,
    I::IntoIter: 'a,
{
    fn into_stream(self) -> Stream<'a, usize, V> {
        Stream::from_values(self.0)
    }
}
