//! Built-in reducers for `reduce` and `aggregate`.
//!
//! A [`Reducer`] is a stateful accumulator: it only changes through
//! [`Reducer::next`], reading it with [`Reducer::value`] is idempotent, and it
//! cannot be rewound.
//!
//! - [`Count`] -- number of entries.
//! - [`Sum<T>`] -- sum of values.
//! - [`Min<T>`] / [`Max<T>`] -- smallest / largest value, natural order or custom comparator.
//! - [`Average`] -- arithmetic mean as `f64`.
//! - [`Callback`] -- fold with a closure.
//!
//! [`ReducerExt`] adds two adapters usable with any reducer:
//! [`extract`](ReducerExt::extract) feeds a projection of each entry and
//! [`when`](ReducerExt::when) only feeds entries matching a predicate.
//!
//! # Examples
//! ```
//! use datastream::reducers::*;
//! use datastream::Stream;
//!
//! # fn main() -> datastream::Result<()> {
//! let orders = vec![("o1", 30u32), ("o2", 5), ("o3", 12)];
//!
//! let large = Stream::from_entries(orders.clone()).reduce(Count::new().when(|v: &u32, _k: &&str| *v > 10))?;
//! assert_eq!(large, 2);
//!
//! let cents = Stream::from_entries(orders).reduce(Sum::new().extract(|v: &u32, _k: &&str| Some(u64::from(*v) * 100)))?;
//! assert_eq!(cents, 4700);
//! # Ok(())
//! # }
//! ```

mod basic;
mod callback;
mod statistical;

pub use basic::{Count, Max, Min, Sum};
pub use callback::Callback;
pub use statistical::{Average, AverageCountingMissing};

/// A stateful accumulator fed once per entry, in stream order.
pub trait Reducer<K, V> {
    /// Type of the accumulated value.
    type Output;

    /// Feed one entry.
    fn next(&mut self, value: &V, key: &K);

    /// Current accumulated value. Reading does not change state.
    fn value(&self) -> Self::Output;
}

/// Adapters available on every reducer.
pub trait ReducerExt: Sized {
    /// Feed the reducer a projection of each entry; `None` projections are skipped.
    fn extract<F>(self, extractor: F) -> Extract<Self, F> {
        Extract {
            inner: self,
            extractor,
        }
    }

    /// Only feed entries for which `predicate(value, key)` holds.
    fn when<P>(self, predicate: P) -> When<Self, P> {
        When {
            inner: self,
            predicate,
        }
    }
}

impl<R> ReducerExt for R {}

/// Reducer adapter created by [`ReducerExt::extract`].
#[derive(Clone, Debug)]
pub struct Extract<R, F> {
    inner: R,
    extractor: F,
}

impl<K, V, T, R, F> Reducer<K, V> for Extract<R, F>
where
    R: Reducer<K, T>,
    F: FnMut(&V, &K) -> Option<T>,
{
    type Output = R::Output;

    fn next(&mut self, value: &V, key: &K) {
        if let Some(projected) = (self.extractor)(value, key) {
            self.inner.next(&projected, key);
        }
    }

    fn value(&self) -> Self::Output {
        self.inner.value()
    }
}

/// Reducer adapter created by [`ReducerExt::when`].
#[derive(Clone, Debug)]
pub struct When<R, P> {
    inner: R,
    predicate: P,
}

impl<K, V, R, P> Reducer<K, V> for When<R, P>
where
    R: Reducer<K, V>,
    P: FnMut(&V, &K) -> bool,
{
    type Output = R::Output;

    fn next(&mut self, value: &V, key: &K) {
        if (self.predicate)(value, key) {
            self.inner.next(value, key);
        }
    }

    fn value(&self) -> Self::Output {
        self.inner.value()
    }
}
