use super::Collector;
use crate::aggregator::Aggregated;
use crate::error::{Result, StreamError};
use crate::stream::Stream;

/// Drains a stream on construction and keeps its values, discarding keys.
pub struct ListCollector<'a, K, V> {
    values: Vec<V>,
    source: Stream<'a, K, V>,
}

impl<'a, K: 'a, V: 'a> ListCollector<'a, K, V> {
    /// Drain `source`.
    ///
    /// # Errors
    /// Propagates the first stage error.
    pub fn new(mut source: Stream<'a, K, V>) -> Result<Self> {
        let values = source.to_values()?;
        Ok(Self { values, source })
    }

    /// Value at `index`.
    ///
    /// # Errors
    /// Returns [`StreamError::OutOfBounds`] past the end of the list.
    pub fn get(&self, index: usize) -> Result<&V> {
        self.values.get(index).ok_or_else(|| {
            StreamError::out_of_bounds(
                index,
                format!("Offset \"{index}\" does not exist in collection of {} items.", self.values.len()),
            )
        })
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }

    /// Take the values out.
    #[must_use]
    pub fn into_vec(self) -> Vec<V> {
        self.values
    }
}

impl<'a, K: 'a, V: 'a> Collector for ListCollector<'a, K, V> {
    type Value<'c>
        = &'c [V]
    where
        Self: 'c;

    fn value(&self) -> &[V] {
        &self.values
    }

    fn aggregated(&self) -> Result<Aggregated> {
        self.source.aggregated()
    }

    fn is_closed(&self) -> bool {
        self.source.is_closed()
    }
}
