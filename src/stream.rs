//! The lazy, single-pass [`Stream`] and its iteration entry point.
//!
//! A `Stream<'a, K, V>` is a deferred sequence of `(K, V)` entries. Every
//! operator consumes its upstream stream by value and returns a new stream, so
//! a pipeline is a chain of owned stages. Nothing is pulled until the outermost
//! stream is iterated.
//!
//! ## Single-pass invariant
//! A stream may be iterated at most once. [`Stream::iter`] marks the stream
//! (and, transitively, every upstream stage) as *closed*; calling it again
//! fails with [`StreamError::Logic`]. Two flags are tracked per stage:
//!
//! - **closed**: iteration was initiated (not necessarily finished).
//! - **exhausted**: the stage reported its end.
//!
//! [`Stream::aggregated`] requires a closed stream and returns running values,
//! which are partial until the stream is exhausted.
//! [`Stream::final_aggregated`] requires an exhausted stream.
//!
//! ## Errors
//! Every stage yields `Result<(K, V)>`. A stage that yields an error is fused:
//! further pulls return `None`.

use crate::aggregator::{Aggregated, Aggregators};
use crate::error::{Result, StreamError};
use crate::source::Source;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Boxed lazy sequence of entries produced by one stage.
pub type BoxedEntries<'a, K, V> = Box<dyn Iterator<Item = Result<(K, V)>> + 'a>;

type Iterate<'a, K, V> = Box<dyn FnOnce() -> BoxedEntries<'a, K, V> + 'a>;

/// Bookkeeping shared between a stage and everything downstream of it.
pub(crate) struct StageState {
    name: &'static str,
    closed: Cell<bool>,
    exhausted: Cell<bool>,
    upstreams: Vec<Upstream>,
}

impl StageState {
    fn new(name: &'static str, upstreams: Vec<Upstream>) -> Rc<Self> {
        Rc::new(Self {
            name,
            closed: Cell::new(false),
            exhausted: Cell::new(false),
            upstreams,
        })
    }
}

/// Read-only view of a stage upstream of some stream.
///
/// Upstream handles stay valid after the stage itself has been moved into the
/// pipeline, so a pipeline can be introspected before and after iteration.
#[derive(Clone)]
pub struct Upstream(Rc<StageState>);

impl Upstream {
    /// Name of the stage (`"source"`, `"filter"`, `"left_join"`, ...).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name
    }

    /// Whether iteration of this stage was initiated.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0.closed.get()
    }

    /// Whether this stage was fully iterated.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.0.exhausted.get()
    }

    /// The stages this stage reads from.
    #[must_use]
    pub fn upstreams(&self) -> &[Upstream] {
        &self.0.upstreams
    }
}

impl fmt::Debug for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upstream")
            .field("name", &self.name())
            .field("closed", &self.is_closed())
            .field("exhausted", &self.is_exhausted())
            .field("upstreams", &self.upstreams())
            .finish()
    }
}

/// A lazy, forward-only, single-traversal sequence of `(K, V)` entries.
///
/// # Example
/// ```
/// use datastream::Stream;
///
/// # fn main() -> datastream::Result<()> {
/// let mut s = Stream::from_entries(vec![("a", 2), ("b", 10), ("c", 5)])
///     .filter(|v, _k| *v > 2)
///     .map(|v, _k| v * 2);
///
/// assert_eq!(s.to_vec()?, vec![("b", 20), ("c", 10)]);
/// assert!(s.iter().is_err()); // single pass
/// # Ok(())
/// # }
/// ```
pub struct Stream<'a, K, V> {
    state: Rc<StageState>,
    iterate: Option<Iterate<'a, K, V>>,
    aggregators: Aggregators<'a>,
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Wrap any [`Source`] into a stream. A stream passed in is returned as-is.
    pub fn new<S: Source<'a, K, V>>(source: S) -> Self {
        source.into_stream()
    }

    /// A source stage over arbitrary `(key, value)` pairs.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: 'a,
    {
        Self::from_results(entries.into_iter().map(Ok))
    }

    /// A source stage over fallible entries; errors are yielded as-is.
    pub fn from_results<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Result<(K, V)>>,
        I::IntoIter: 'a,
    {
        let iter = entries.into_iter();
        Self::source("source", move || Box::new(iter))
    }

    /// An empty source stage.
    #[must_use]
    pub fn empty() -> Self {
        Self::source("source", || Box::new(std::iter::empty()))
    }

    pub(crate) fn source<F>(name: &'static str, iterate: F) -> Self
    where
        F: FnOnce() -> BoxedEntries<'a, K, V> + 'a,
    {
        Self {
            state: StageState::new(name, Vec::new()),
            iterate: Some(Box::new(iterate)),
            aggregators: Aggregators::default(),
        }
    }

    /// Build a stage reading from `self`.
    ///
    /// `build` receives the upstream iterator and runs when the new stage is
    /// first iterated, never at construction.
    pub(crate) fn stage<K2, V2, I, F>(self, name: &'static str, build: F) -> Stream<'a, K2, V2>
    where
        K2: 'a,
        V2: 'a,
        I: Iterator<Item = Result<(K2, V2)>> + 'a,
        F: FnOnce(StreamIter<'a, K, V>) -> I + 'a,
    {
        let aggregators = self.aggregators.clone();
        Stream {
            state: StageState::new(name, vec![self.upstream()]),
            iterate: Some(Box::new(move || -> BoxedEntries<'a, K2, V2> {
                Box::new(build(self.into_iter()))
            })),
            aggregators,
        }
    }

    /// Build a stage reading from `self` and `other`.
    pub(crate) fn stage2<K2, V2, K3, V3, I, F>(
        self,
        other: Stream<'a, K2, V2>,
        name: &'static str,
        build: F,
    ) -> Stream<'a, K3, V3>
    where
        K2: 'a,
        V2: 'a,
        K3: 'a,
        V3: 'a,
        I: Iterator<Item = Result<(K3, V3)>> + 'a,
        F: FnOnce(StreamIter<'a, K, V>, StreamIter<'a, K2, V2>) -> I + 'a,
    {
        let mut aggregators = self.aggregators.clone();
        aggregators.extend(&other.aggregators);
        Stream {
            state: StageState::new(name, vec![self.upstream(), other.upstream()]),
            iterate: Some(Box::new(move || -> BoxedEntries<'a, K3, V3> {
                Box::new(build(self.into_iter(), other.into_iter()))
            })),
            aggregators,
        }
    }

    /// Attach a custom operator.
    ///
    /// `factory` receives the upstream iterator and returns any iterator of
    /// entries; it is invoked lazily, on first iteration of the returned
    /// stream. This is the extension point for stages the crate does not ship.
    ///
    /// # Example
    /// ```
    /// use datastream::{Result, Stream};
    ///
    /// # fn main() -> Result<()> {
    /// let mut s = Stream::from_values(vec![1, 2, 3])
    ///     .operator("swap", |upstream| {
    ///         upstream.map(|entry| entry.map(|(k, v)| (v, k)))
    ///     });
    ///
    /// assert_eq!(s.to_vec()?, vec![(1, 0), (2, 1), (3, 2)]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn operator<K2, V2, I, F>(self, name: &'static str, factory: F) -> Stream<'a, K2, V2>
    where
        K2: 'a,
        V2: 'a,
        I: Iterator<Item = Result<(K2, V2)>> + 'a,
        F: FnOnce(StreamIter<'a, K, V>) -> I + 'a,
    {
        self.stage(name, factory)
    }

    pub(crate) fn with_aggregators(mut self, aggregators: Aggregators<'a>) -> Self {
        self.aggregators = aggregators;
        self
    }

    pub(crate) fn upstream(&self) -> Upstream {
        Upstream(Rc::clone(&self.state))
    }

    /// Name of this stage.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.state.name
    }

    /// Stages this stream reads from (zero for a source, two for merge/join).
    #[must_use]
    pub fn upstreams(&self) -> &[Upstream] {
        &self.state.upstreams
    }

    /// Named aggregators attached to this stream or any of its upstreams.
    #[must_use]
    pub fn aggregators(&self) -> &Aggregators<'a> {
        &self.aggregators
    }

    /// Whether iteration of this stream was initiated.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.closed.get()
    }

    /// Whether this stream was fully iterated.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state.exhausted.get()
    }

    /// Current values of every attached aggregator.
    ///
    /// Values are in progress while the stream is only partially consumed.
    ///
    /// # Errors
    /// Returns [`StreamError::Logic`] if iteration has not started.
    pub fn aggregated(&self) -> Result<Aggregated> {
        if !self.is_closed() {
            return Err(StreamError::logic("Stream is not iterated."));
        }
        Ok(self.aggregators.snapshot())
    }

    /// Final values of every attached aggregator.
    ///
    /// A downstream `take` can end this stream before an aggregator upstream
    /// of it saw every entry; such a stream has no final values.
    ///
    /// # Errors
    /// Returns [`StreamError::Logic`] unless the stream and every stage
    /// feeding an aggregator were fully iterated.
    pub fn final_aggregated(&self) -> Result<Aggregated> {
        if !self.is_exhausted() || !self.aggregators.is_finished() {
            return Err(StreamError::logic("Stream is not fully iterated."));
        }
        Ok(self.aggregators.snapshot())
    }

    /// Start iterating this stream.
    ///
    /// # Errors
    /// Returns [`StreamError::Logic`] if the stream was already iterated.
    pub fn iter(&mut self) -> Result<StreamIter<'a, K, V>> {
        let iterate = self
            .iterate
            .take()
            .ok_or_else(|| StreamError::logic("Stream is already iterated."))?;
        self.state.closed.set(true);
        trace!(stage = self.state.name, "stream opened");
        Ok(StreamIter {
            inner: Some(iterate()),
            state: Rc::clone(&self.state),
            failure: None,
        })
    }

    /// Drain the stream without collecting, returning the number of entries.
    ///
    /// The stream stays around so [`aggregated`](Self::aggregated) can be read.
    ///
    /// # Errors
    /// Propagates the first error produced by any stage.
    pub fn flush(&mut self) -> Result<usize> {
        let mut count = 0;
        for entry in self.iter()? {
            entry?;
            count += 1;
        }
        Ok(count)
    }

    /// Drain the stream into a vector of entries.
    ///
    /// # Errors
    /// Propagates the first error produced by any stage.
    pub fn to_vec(&mut self) -> Result<Vec<(K, V)>> {
        self.iter()?.collect()
    }

    /// Drain the stream into a vector of values, discarding keys.
    ///
    /// # Errors
    /// Propagates the first error produced by any stage.
    pub fn to_values(&mut self) -> Result<Vec<V>> {
        self.iter()?.map(|entry| entry.map(|(_, v)| v)).collect()
    }

    /// Hand the stream to a collector factory, e.g. `ListCollector::new`.
    ///
    /// # Errors
    /// Whatever the collector returns.
    pub fn collect<C, F>(self, factory: F) -> Result<C>
    where
        F: FnOnce(Self) -> Result<C>,
    {
        factory(self)
    }
}

impl<'a, V: 'a> Stream<'a, usize, V> {
    /// A source stage over plain values, keyed sequentially from 0.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: 'a,
    {
        Self::from_entries(values.into_iter().enumerate())
    }
}

impl<'a, K: 'a, V: 'a> IntoIterator for Stream<'a, K, V> {
    type Item = Result<(K, V)>;
    type IntoIter = StreamIter<'a, K, V>;

    /// Consume the stream. A closed stream yields a single logic error.
    fn into_iter(mut self) -> Self::IntoIter {
        match self.iter() {
            Ok(iter) => iter,
            Err(err) => StreamIter {
                inner: None,
                state: Rc::clone(&self.state),
                failure: Some(err),
            },
        }
    }
}

impl<K, V> fmt::Debug for Stream<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("name", &self.state.name)
            .field("closed", &self.state.closed.get())
            .field("exhausted", &self.state.exhausted.get())
            .field("upstreams", &self.state.upstreams)
            .field("aggregators", &self.aggregators.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Iterator returned by [`Stream::iter`].
///
/// Fused after the first error or after exhaustion. Dropping it drops every
/// upstream stage, which is what runs pending finalizers on early abandonment.
pub struct StreamIter<'a, K, V> {
    inner: Option<BoxedEntries<'a, K, V>>,
    state: Rc<StageState>,
    failure: Option<StreamError>,
}

impl<K, V> Iterator for StreamIter<'_, K, V> {
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.failure.take() {
            return Some(Err(err));
        }
        let inner = self.inner.as_mut()?;
        match inner.next() {
            Some(Ok(entry)) => Some(Ok(entry)),
            Some(Err(err)) => {
                self.inner = None;
                Some(Err(err))
            }
            None => {
                self.inner = None;
                self.state.exhausted.set(true);
                trace!(stage = self.state.name, "stream exhausted");
                None
            }
        }
    }
}
