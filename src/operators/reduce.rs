//! Pass-through reduction and the reducing terminals.
//!
//! [`Reduce`] yields every upstream entry unchanged and feeds it to a
//! [`Reducer`] on the way. It backs both [`Stream::aggregate`] (as a stage) and
//! [`Stream::reduce`] (drained on the spot).

use crate::error::{Result, StreamError};
use crate::reducers::{Average, Count, Max, Min, Reducer, Sum};
use crate::stream::Stream;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::ops::Add;
use std::rc::Rc;

/// Iterator adapter feeding each `(K, V)` to a reducer before yielding it.
///
/// Errors pass through without reaching the reducer.
pub struct Reduce<K, V, I, R> {
    upstream: I,
    reducer: Rc<RefCell<R>>,
    drained: bool,
    _entry: PhantomData<fn(&K, &V)>,
}

impl<K, V, I, R> Reduce<K, V, I, R>
where
    I: Iterator<Item = Result<(K, V)>>,
    R: Reducer<K, V>,
{
    /// Wrap `upstream`, feeding entries to `reducer`.
    pub fn new(upstream: I, reducer: R) -> Self {
        Self::shared(upstream, Rc::new(RefCell::new(reducer)))
    }

    pub(crate) const fn shared(upstream: I, reducer: Rc<RefCell<R>>) -> Self {
        Self {
            upstream,
            reducer,
            drained: false,
            _entry: PhantomData,
        }
    }

    /// Value of the reducer once the upstream is drained.
    ///
    /// # Errors
    /// Returns [`StreamError::Logic`] while upstream entries remain.
    pub fn value(&self) -> Result<R::Output> {
        if !self.drained {
            return Err(StreamError::logic("Stream is not iterated."));
        }
        Ok(self.reducer.borrow().value())
    }
}

impl<K, V, I, R> Iterator for Reduce<K, V, I, R>
where
    I: Iterator<Item = Result<(K, V)>>,
    R: Reducer<K, V>,
{
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.drained {
            return None;
        }
        match self.upstream.next() {
            Some(Ok((key, value))) => {
                self.reducer.borrow_mut().next(&value, &key);
                Some(Ok((key, value)))
            }
            Some(Err(err)) => Some(Err(err)),
            None => {
                self.drained = true;
                None
            }
        }
    }
}

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Drain the stream into `reducer` and return its final value.
    ///
    /// # Errors
    /// Propagates the first stage error, or a logic error if the stream was
    /// already iterated.
    ///
    /// # Example
    /// ```
    /// use datastream::reducers::Max;
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let longest = Stream::from_values(vec!["ab", "abcd", "a"])
    ///     .reduce(Max::by(|a: &&str, b: &&str| a.len().cmp(&b.len())))?;
    /// assert_eq!(longest, Some("abcd"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn reduce<R: Reducer<K, V>>(self, reducer: R) -> Result<R::Output> {
        let mut reduce = Reduce::new(self.into_iter(), reducer);
        for entry in reduce.by_ref() {
            entry?;
        }
        reduce.value()
    }

    /// Number of entries.
    ///
    /// # Errors
    /// See [`reduce`](Self::reduce).
    pub fn count(self) -> Result<usize> {
        self.reduce(Count::new())
    }

    /// Sum of values, `V::default()` for an empty stream.
    ///
    /// # Errors
    /// See [`reduce`](Self::reduce).
    pub fn sum(self) -> Result<V>
    where
        V: Clone + Default + Add<Output = V>,
    {
        self.reduce(Sum::new())
    }

    /// Smallest value.
    ///
    /// # Errors
    /// See [`reduce`](Self::reduce).
    pub fn min(self) -> Result<Option<V>>
    where
        V: Ord + Clone,
    {
        self.reduce(Min::new())
    }

    /// Largest value.
    ///
    /// # Errors
    /// See [`reduce`](Self::reduce).
    pub fn max(self) -> Result<Option<V>>
    where
        V: Ord + Clone,
    {
        self.reduce(Max::new())
    }

    /// Arithmetic mean of values, `None` for an empty stream.
    ///
    /// # Errors
    /// See [`reduce`](Self::reduce).
    pub fn average(self) -> Result<Option<f64>>
    where
        V: Clone + Into<f64>,
    {
        self.reduce(Average::new())
    }
}
