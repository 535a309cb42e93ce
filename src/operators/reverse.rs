//! Reversal. Materializes the whole upstream.

use super::deferred;
use crate::error::Result;
use crate::stream::Stream;
use tracing::debug;

impl<'a, K: 'a, V: 'a> Stream<'a, K, V> {
    /// Yield the upstream entries in reverse order.
    ///
    /// The whole upstream is pulled into memory on the first pull, so this must
    /// not be used on unbounded sources.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.stage("reverse", |upstream| {
            deferred(move || {
                let entries = upstream.collect::<Result<Vec<_>>>()?;
                debug!(stage = "reverse", entries = entries.len(), "materialized upstream");
                Ok(entries.into_iter().rev().map(Ok))
            })
        })
    }
}
