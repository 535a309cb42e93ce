//! Joins: run-length `compress_join` and keyed `left_join`.

use super::deferred;
use crate::collectors::{Index, IndexKey};
use crate::error::Result;
use crate::source::Source;
use crate::stream::Stream;
use std::mem::{replace, take};
use tracing::debug;

/// Groups runs of consecutive entries and replaces each run with the entries
/// produced by a join function.
pub struct CompressJoin<I, K, V, P, J, O: IntoIterator> {
    upstream: I,
    predicate: P,
    join: J,
    run: Vec<(K, V)>,
    pending: Option<O::IntoIter>,
    finished: bool,
}

impl<I, K, V, P, J, O, K2, V2> Iterator for CompressJoin<I, K, V, P, J, O>
where
    I: Iterator<Item = Result<(K, V)>>,
    P: FnMut((&V, &V), (&K, &K), &[(K, V)]) -> bool,
    J: FnMut(Vec<(K, V)>) -> O,
    O: IntoIterator<Item = (K2, V2)>,
{
    type Item = Result<(K2, V2)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pending) = self.pending.as_mut() {
                if let Some(entry) = pending.next() {
                    return Some(Ok(entry));
                }
                self.pending = None;
            }
            if self.finished {
                return None;
            }
            match self.upstream.next() {
                Some(Ok((key, value))) => {
                    let breaks = match self.run.last() {
                        Some((prev_key, prev_value)) => {
                            !(self.predicate)((prev_value, &value), (prev_key, &key), &self.run)
                        }
                        None => false,
                    };
                    if breaks {
                        let run = replace(&mut self.run, vec![(key, value)]);
                        self.pending = Some((self.join)(run).into_iter());
                    } else {
                        self.run.push((key, value));
                    }
                }
                Some(Err(err)) => return Some(Err(err)),
                None => {
                    self.finished = true;
                    if !self.run.is_empty() {
                        let run = take(&mut self.run);
                        self.pending = Some((self.join)(run).into_iter());
                    }
                }
            }
        }
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Streaming run-length join.
    ///
    /// Consecutive entries stay in the same run while
    /// `predicate((previous_value, value), (previous_key, key), run)` holds.
    /// When it fails, or the upstream ends, the run is handed to `join` and the
    /// entries it returns are yielded. Only adjacent entries are grouped, so
    /// the upstream should already be ordered by the grouping criterion.
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let mut s = Stream::from_entries(vec![(1, (10, 2)), (2, (10, 3)), (3, (20, 1))])
    ///     .compress_join(
    ///         |(prev, cur), _keys, _run| prev.0 == cur.0,
    ///         |run| {
    ///             let group = run[0].1.0;
    ///             [(group, run.into_iter().map(|(_, v)| v.1).collect::<Vec<_>>())]
    ///         },
    ///     );
    ///
    /// assert_eq!(s.to_vec()?, vec![(10, vec![2, 3]), (20, vec![1])]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn compress_join<K2, V2, P, J, O>(self, predicate: P, join: J) -> Stream<'a, K2, V2>
    where
        K2: 'a,
        V2: 'a,
        P: FnMut((&V, &V), (&K, &K), &[(K, V)]) -> bool + 'a,
        J: FnMut(Vec<(K, V)>) -> O + 'a,
        O: IntoIterator<Item = (K2, V2)> + 'a,
    {
        self.stage("compress_join", move |upstream| CompressJoin {
            upstream,
            predicate,
            join,
            run: Vec::new(),
            pending: None::<O::IntoIter>,
            finished: false,
        })
    }

    /// Left join against `right` by key.
    ///
    /// On the first pull `right` is drained into a multi-valued index (memory
    /// grows with its size). Then every left entry is yielded as
    /// `(key, (value, matches))`, where `matches` lists every right value with
    /// an equal key, in right order, or is empty.
    ///
    /// A key that cannot be indexed (see [`IndexKey`]) fails the stream with
    /// [`StreamError::Unsupported`](crate::StreamError::Unsupported).
    ///
    /// # Example
    /// ```
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let mut s = Stream::from_entries(vec![(1, 'a'), (2, 'b'), (3, 'c')])
    ///     .left_join(vec![(1, 'x'), (2, 'y')]);
    ///
    /// assert_eq!(
    ///     s.to_vec()?,
    ///     vec![(1, ('a', vec!['x'])), (2, ('b', vec!['y'])), (3, ('c', vec![]))]
    /// );
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn left_join<W, S>(self, right: S) -> Stream<'a, K, (V, Vec<W>)>
    where
        K: IndexKey,
        W: Clone + 'a,
        S: Source<'a, K, W>,
    {
        self.stage2(right.into_stream(), "left_join", |left, right| {
            deferred(move || {
                let index = Index::build(right)?;
                debug!(stage = "left_join", entries = index.len(), "materialized right side");
                Ok(left.map(move |entry| -> Result<(K, (V, Vec<W>))> {
                    let (key, value) = entry?;
                    let matches = index.lookup(&key)?.cloned().collect();
                    Ok((key, (value, matches)))
                }))
            })
        })
    }
}
