//! Statistical reducers: `Average`

use super::Reducer;

/* ===================== Average ===================== */

/// Arithmetic mean of values as `f64`.
///
/// Values must be convertible into `f64` via `Into<f64>`. An initial total can
/// be given; it does not count as an entry. Produces `None` until at least one
/// entry was seen.
#[derive(Clone, Copy, Debug, Default)]
pub struct Average {
    total: f64,
    count: u64,
}

impl Average {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total: 0.0,
            count: 0,
        }
    }

    /// Start from an initial running total.
    #[must_use]
    pub const fn with_initial(total: f64) -> Self {
        Self { total, count: 0 }
    }

    /// Average a projection of each entry, counting entries whose projection
    /// is `None` in the denominator.
    ///
    /// Unlike `Average::new().extract(..)`, which skips such entries, missing
    /// values here pull the mean towards zero.
    #[must_use]
    pub const fn counting_missing<F>(extractor: F) -> AverageCountingMissing<F> {
        AverageCountingMissing {
            inner: Self::new(),
            extractor,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total / self.count as f64)
        }
    }
}

impl<K, V> Reducer<K, V> for Average
where
    V: Clone + Into<f64>,
{
    type Output = Option<f64>;

    fn next(&mut self, value: &V, _key: &K) {
        self.total += value.clone().into();
        self.count += 1;
    }

    fn value(&self) -> Option<f64> {
        self.mean()
    }
}

/// Reducer created by [`Average::counting_missing`].
#[derive(Clone, Debug)]
pub struct AverageCountingMissing<F> {
    inner: Average,
    extractor: F,
}

impl<K, V, T, F> Reducer<K, V> for AverageCountingMissing<F>
where
    F: FnMut(&V, &K) -> Option<T>,
    T: Into<f64>,
{
    type Output = Option<f64>;

    fn next(&mut self, value: &V, key: &K) {
        if let Some(projected) = (self.extractor)(value, key) {
            self.inner.total += projected.into();
        }
        self.inner.count += 1;
    }

    fn value(&self) -> Option<f64> {
        self.inner.mean()
    }
}
