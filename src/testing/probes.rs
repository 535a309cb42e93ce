//! Probes that observe a pipeline without changing it.

use crate::stream::Stream;
use std::cell::Cell;
use std::rc::Rc;

/// Counts entries pulled through a point of the pipeline.
///
/// Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct PullCounter {
    pulls: Rc<Cell<usize>>,
}

impl PullCounter {
    /// New counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pass `stream` through, counting every entry pulled from it.
    #[must_use]
    pub fn wrap<'a, K: 'a, V: 'a>(&self, stream: Stream<'a, K, V>) -> Stream<'a, K, V> {
        let pulls = Rc::clone(&self.pulls);
        stream.tap(move |_, _| pulls.set(pulls.get() + 1))
    }

    /// Entries pulled so far.
    #[must_use]
    pub fn pulls(&self) -> usize {
        self.pulls.get()
    }
}
