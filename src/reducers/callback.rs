//! Closure-backed reducer.

use super::Reducer;

/// Folds every entry into an accumulator with a closure.
///
/// # Example
/// ```
/// use datastream::reducers::Callback;
/// use datastream::Stream;
///
/// # fn main() -> datastream::Result<()> {
/// let joined = Stream::from_entries(vec![("a", 1), ("b", 2)])
///     .reduce(Callback::new(String::new(), |acc: &mut String, v: &i32, k: &&str| {
///         acc.push_str(&format!("{k}={v};"));
///     }))?;
/// assert_eq!(joined, "a=1;b=2;");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Callback<A, F> {
    acc: A,
    fold: F,
}

impl<A, F> Callback<A, F> {
    /// Start from `initial`; `fold(acc, value, key)` updates it in place.
    pub const fn new(initial: A, fold: F) -> Self {
        Self { acc: initial, fold }
    }
}

impl<K, V, A, F> Reducer<K, V> for Callback<A, F>
where
    A: Clone,
    F: FnMut(&mut A, &V, &K),
{
    type Output = A;

    fn next(&mut self, value: &V, key: &K) {
        (self.fold)(&mut self.acc, value, key);
    }

    fn value(&self) -> A {
        self.acc.clone()
    }
}
