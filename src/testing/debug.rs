//! Debug utilities for inspecting pipelines during test execution.
//!
//! Output goes through `tracing` at `DEBUG` level under the
//! `datastream::testing` target; install a subscriber (for instance
//! `tracing_subscriber::fmt`) to see it.

use crate::stream::Stream;
use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;
use tracing::debug;

/// Extension trait adding debug stages to [`Stream`].
///
/// All methods are pass-through: entries are yielded unchanged.
pub trait StreamDebugExt<'a, K, V> {
    /// Log every entry as it flows past.
    ///
    /// # Example
    ///
    /// ```
    /// use datastream::testing::StreamDebugExt;
    /// use datastream::Stream;
    ///
    /// # fn main() -> datastream::Result<()> {
    /// let mut s = Stream::from_values(vec![1, 2, 3])
    ///     .debug_inspect("after source")
    ///     .map(|v, _k| v * 2)
    ///     .debug_inspect("after map");
    /// assert_eq!(s.to_values()?, vec![2, 4, 6]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    fn debug_inspect(self, label: &'static str) -> Stream<'a, K, V>
    where
        K: Debug,
        V: Debug;

    /// Log the number of entries once the stream is exhausted.
    #[must_use]
    fn debug_count(self, label: &'static str) -> Stream<'a, K, V>;
}

impl<'a, K: 'a, V: 'a> StreamDebugExt<'a, K, V> for Stream<'a, K, V> {
    fn debug_inspect(self, label: &'static str) -> Self
    where
        K: Debug,
        V: Debug,
    {
        let mut position = 0usize;
        self.tap(move |value, key| {
            debug!(target: "datastream::testing", label, position, ?key, ?value, "entry");
            position += 1;
        })
    }

    fn debug_count(self, label: &'static str) -> Self {
        let counted = Rc::new(Cell::new(0usize));
        let tally = Rc::clone(&counted);
        self.tap(move |_, _| tally.set(tally.get() + 1))
            .finalize(move || debug!(target: "datastream::testing", label, count = counted.get(), "count"))
    }
}
