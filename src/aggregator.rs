//! Named side-channel aggregations computed during the single pass.
//!
//! [`Stream::aggregate`] wraps the stream in a `reduce` stage that feeds every
//! entry into a [`Reducer`] and then yields it unchanged. The reducer is
//! registered under a name and the registration flows forward through every
//! downstream stage, so a terminal consumer can read all attached values from
//! the outermost stream.
//!
//! Chaining several `aggregate` calls nests the reduce stages: one drain
//! updates every reducer once per entry, in stream order.
//!
//! ```
//! use datastream::reducers::{Count, Sum};
//! use datastream::Stream;
//!
//! # fn main() -> datastream::Result<()> {
//! let mut s = Stream::from_values(vec![2, 10])
//!     .aggregate("count", Count::new())
//!     .aggregate("sum", Sum::new());
//! s.flush()?;
//!
//! let aggregated = s.aggregated()?;
//! assert_eq!(aggregated.get::<usize>("count"), Some(&2));
//! assert_eq!(aggregated.get::<i32>("sum"), Some(&12));
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, StreamError};
use crate::operators::reduce::Reduce;
use crate::reducers::Reducer;
use crate::stream::{Stream, Upstream};
use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::warn;

/// Object-safe view of an attached aggregator.
pub trait AggregatorHandle {
    /// Registered name.
    fn name(&self) -> &str;

    /// Whether the stage feeding the reducer has started iterating.
    fn is_started(&self) -> bool;

    /// Whether the stage feeding the reducer was fully iterated.
    fn is_finished(&self) -> bool;

    /// Current reducer value, type-erased.
    fn snapshot(&self) -> Box<dyn Any>;
}

/// A reducer bound to a name and to the `reduce` stage that feeds it.
pub struct Aggregator<K, V, R> {
    name: String,
    reducer: Rc<RefCell<R>>,
    stage: Upstream,
    _entry: PhantomData<fn(&K, &V)>,
}

impl<K, V, R: Reducer<K, V>> Aggregator<K, V, R> {
    /// Registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Running value of the reducer.
    ///
    /// # Errors
    /// Returns [`StreamError::Logic`] if the stream has not been iterated.
    pub fn value(&self) -> Result<R::Output> {
        if !self.stage.is_closed() {
            return Err(StreamError::logic("Stream is not iterated."));
        }
        Ok(self.reducer.borrow().value())
    }

    /// Final value of the reducer.
    ///
    /// # Errors
    /// Returns [`StreamError::Logic`] unless the stream was fully iterated.
    pub fn final_value(&self) -> Result<R::Output> {
        if !self.stage.is_exhausted() {
            return Err(StreamError::logic("Stream is not fully iterated."));
        }
        Ok(self.reducer.borrow().value())
    }
}

impl<K, V, R> AggregatorHandle for Aggregator<K, V, R>
where
    R: Reducer<K, V>,
    R::Output: 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn is_started(&self) -> bool {
        self.stage.is_closed()
    }

    fn is_finished(&self) -> bool {
        self.stage.is_exhausted()
    }

    fn snapshot(&self) -> Box<dyn Any> {
        Box::new(self.reducer.borrow().value())
    }
}

/// Aggregators attached to a stream, keyed by name.
#[derive(Clone, Default)]
pub struct Aggregators<'a> {
    entries: BTreeMap<String, Rc<dyn AggregatorHandle + 'a>>,
}

impl<'a> Aggregators<'a> {
    pub(crate) fn insert(&mut self, handle: Rc<dyn AggregatorHandle + 'a>) {
        let name = handle.name().to_string();
        if self.entries.insert(name.clone(), handle).is_some() {
            warn!(aggregator = %name, "aggregator name shadows an upstream aggregator");
        }
    }

    pub(crate) fn extend(&mut self, other: &Self) {
        for handle in other.entries.values() {
            self.insert(Rc::clone(handle));
        }
    }

    /// Look up an aggregator by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&(dyn AggregatorHandle + 'a)> {
        self.entries.get(name).map(|h| &**h)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of aggregators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no aggregator is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the stage feeding every aggregator was fully iterated.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.entries.values().all(|handle| handle.is_finished())
    }

    pub(crate) fn snapshot(&self) -> Aggregated {
        Aggregated {
            values: self
                .entries
                .iter()
                .map(|(name, handle)| (name.clone(), Rc::from(handle.snapshot())))
                .collect(),
        }
    }
}

impl fmt::Debug for Aggregators<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Snapshot of aggregator values, keyed by name.
#[derive(Clone, Default)]
pub struct Aggregated {
    values: BTreeMap<String, Rc<dyn Any>>,
}

impl Aggregated {
    /// Value of `name`, if present and of type `T`.
    #[must_use]
    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        self.values.get(name)?.downcast_ref::<T>()
    }

    /// Value of `name` as `T`.
    ///
    /// # Errors
    /// [`StreamError::OutOfBounds`] if no aggregator has that name,
    /// [`StreamError::Logic`] if its value is not a `T`.
    pub fn value<T: Clone + 'static>(&self, name: &str) -> Result<T> {
        let value = self.values.get(name).ok_or_else(|| {
            StreamError::out_of_bounds(name, format!("Aggregator \"{name}\" does not exist."))
        })?;
        value.downcast_ref::<T>().cloned().ok_or_else(|| {
            StreamError::logic(format!(
                "Aggregator \"{name}\" does not hold a value of type {}.",
                std::any::type_name::<T>()
            ))
        })
    }

    /// Whether a value is present for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Names present, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Aggregated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Attach a named reducer that observes every entry of this stream.
    ///
    /// The returned stream yields exactly the same entries. Its
    /// [`aggregated`](Stream::aggregated) snapshot (and that of every stream
    /// built on top of it) contains the reducer's value under `name`. A later
    /// aggregator with the same name shadows the earlier one.
    ///
    /// An empty `name` is not registered; iterating the returned stream then
    /// yields a [`StreamError::Logic`] before any entry.
    #[must_use]
    pub fn aggregate<R>(self, name: impl Into<String>, reducer: R) -> Self
    where
        R: Reducer<K, V> + 'a,
        R::Output: 'static,
    {
        self.aggregate_with(name, reducer).0
    }

    /// Like [`aggregate`](Self::aggregate), also returning a typed handle to
    /// the aggregator.
    ///
    /// # Example
    /// ```
    /// use datastream::reducers::Sum;
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let (mut s, total) = Stream::from_values(vec![1, 2, 3]).aggregate_with("total", Sum::new());
    /// assert!(total.value().is_err());
    ///
    /// let mut it = s.iter()?;
    /// it.next();
    /// assert_eq!(total.value()?, 1);
    /// assert!(total.final_value().is_err());
    ///
    /// it.for_each(drop);
    /// assert_eq!(total.final_value()?, 6);
    /// # Ok(())
    /// # }
    /// ```
    pub fn aggregate_with<R>(
        self,
        name: impl Into<String>,
        reducer: R,
    ) -> (Self, Rc<Aggregator<K, V, R>>)
    where
        R: Reducer<K, V> + 'a,
        R::Output: 'static,
    {
        let name = name.into();
        let invalid = name.is_empty();

        let reducer = Rc::new(RefCell::new(reducer));
        let shared = Rc::clone(&reducer);
        let reduced = self.stage("reduce", move |upstream| Reduce::shared(upstream, shared));

        let aggregator = Rc::new(Aggregator {
            name,
            reducer,
            stage: reduced.upstream(),
            _entry: PhantomData,
        });
        let mut aggregators = reduced.aggregators().clone();
        if invalid {
            warn!("aggregator with an empty name is not registered");
        } else {
            aggregators.insert(Rc::clone(&aggregator) as Rc<dyn AggregatorHandle + 'a>);
        }

        let stream = reduced
            .stage("aggregate", move |upstream| {
                invalid
                    .then(|| Err(StreamError::logic("Aggregator name must not be empty.")))
                    .into_iter()
                    .chain(upstream)
            })
            .with_aggregators(aggregators);
        (stream, aggregator)
    }
}
