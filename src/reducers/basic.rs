//! Basic reducers: Count, Sum, Min, Max

use super::Reducer;
use std::cmp::Ordering;
use std::mem::take;
use std::ops::Add;

/* ===================== Count ===================== */

/// Number of entries seen.
///
/// Combine with [`when`](super::ReducerExt::when) to count matching entries only.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count {
    count: usize,
}

impl Count {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }
}

impl<K, V> Reducer<K, V> for Count {
    type Output = usize;

    fn next(&mut self, _value: &V, _key: &K) {
        self.count += 1;
    }

    fn value(&self) -> usize {
        self.count
    }
}

/* ===================== Sum<T> ===================== */

/// Sum of values.
///
/// Starts at `T::default()` unless an initial value is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum<T> {
    total: T,
}

impl<T: Default> Sum<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Sum<T> {
    /// Start summing from `initial`.
    pub const fn with_initial(initial: T) -> Self {
        Self { total: initial }
    }
}

impl<K, T> Reducer<K, T> for Sum<T>
where
    T: Clone + Default + Add<Output = T>,
{
    type Output = T;

    fn next(&mut self, value: &T, _key: &K) {
        self.total = take(&mut self.total) + value.clone();
    }

    fn value(&self) -> T {
        self.total.clone()
    }
}

/* ===================== Min<T> / Max<T> ===================== */

/// Smallest value seen, `None` until a value arrives (or an initial is given).
///
/// Uses `Ord` unless built with [`Min::by`].
#[derive(Clone, Copy, Debug)]
pub struct Min<T, C = fn(&T, &T) -> Ordering> {
    best: Option<T>,
    cmp: C,
}

impl<T: Ord> Min<T> {
    /// Natural ordering.
    #[must_use]
    pub fn new() -> Self {
        Self {
            best: None,
            cmp: T::cmp,
        }
    }

    /// Natural ordering, starting from `initial`.
    #[must_use]
    pub fn with_initial(initial: T) -> Self {
        Self {
            best: Some(initial),
            cmp: T::cmp,
        }
    }
}

impl<T: Ord> Default for Min<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: FnMut(&T, &T) -> Ordering> Min<T, C> {
    /// Custom comparator.
    pub const fn by(cmp: C) -> Self {
        Self { best: None, cmp }
    }
}

impl<K, T, C> Reducer<K, T> for Min<T, C>
where
    T: Clone,
    C: FnMut(&T, &T) -> Ordering,
{
    type Output = Option<T>;

    fn next(&mut self, value: &T, _key: &K) {
        match &self.best {
            Some(cur) if (self.cmp)(value, cur) != Ordering::Less => {}
            _ => self.best = Some(value.clone()),
        }
    }

    fn value(&self) -> Option<T> {
        self.best.clone()
    }
}

/// Largest value seen, `None` until a value arrives (or an initial is given).
///
/// Uses `Ord` unless built with [`Max::by`].
#[derive(Clone, Copy, Debug)]
pub struct Max<T, C = fn(&T, &T) -> Ordering> {
    best: Option<T>,
    cmp: C,
}

impl<T: Ord> Max<T> {
    /// Natural ordering.
    #[must_use]
    pub fn new() -> Self {
        Self {
            best: None,
            cmp: T::cmp,
        }
    }

    /// Natural ordering, starting from `initial`.
    #[must_use]
    pub fn with_initial(initial: T) -> Self {
        Self {
            best: Some(initial),
            cmp: T::cmp,
        }
    }
}

impl<T: Ord> Default for Max<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: FnMut(&T, &T) -> Ordering> Max<T, C> {
    /// Custom comparator.
    pub const fn by(cmp: C) -> Self {
        Self { best: None, cmp }
    }
}

impl<K, T, C> Reducer<K, T> for Max<T, C>
where
    T: Clone,
    C: FnMut(&T, &T) -> Ordering,
{
    type Output = Option<T>;

    fn next(&mut self, value: &T, _key: &K) {
        match &self.best {
            Some(cur) if (self.cmp)(value, cur) != Ordering::Greater => {}
            _ => self.best = Some(value.clone()),
        }
    }

    fn value(&self) -> Option<T> {
        self.best.clone()
    }
}
