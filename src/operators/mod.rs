//! Stage implementations.
//!
//! Each file adds one family of builder methods to [`Stream`](crate::Stream)
//! through its own `impl` block, plus the iterator adapter that does the
//! pulling when the adapter needs state of its own.
//!
//! Stateless stages (`map`, `filter`, `tap`) are plain iterator combinators
//! over the upstream [`StreamIter`](crate::StreamIter). Stages that must see the
//! whole upstream first (`reverse`, `sort`, the right side of `left_join`) wait
//! for their first pull before materializing, through [`Deferred`].

pub mod buffer;
pub mod distinct;
pub mod filter;
pub mod finalize;
pub mod flatten;
pub mod if_empty;
pub mod joins;
pub mod map;
pub mod merge;
pub mod overflow;
pub mod reduce;
pub mod reverse;
pub mod skip;
pub mod sort;
pub mod take;
pub mod tap;

pub use buffer::{BufferCount, BufferWhile};
pub use distinct::Distinct;
pub use finalize::Finalize;
pub use flatten::Flatten;
pub use if_empty::IfEmpty;
pub use joins::CompressJoin;
pub use overflow::Overflow;
pub use reduce::Reduce;
pub use skip::Skip;
pub use take::{Take, TakeUntil};

use crate::error::Result;

/// Runs `init` on the first pull and then yields from the iterator it built.
///
/// An error from `init` is yielded once; later pulls return `None`.
pub(crate) struct Deferred<F, J> {
    init: Option<F>,
    iter: Option<J>,
}

pub(crate) fn deferred<F, J, T>(init: F) -> Deferred<F, J>
where
    F: FnOnce() -> Result<J>,
    J: Iterator<Item = Result<T>>,
{
    Deferred {
        init: Some(init),
        iter: None,
    }
}

impl<F, J, T> Iterator for Deferred<F, J>
where
    F: FnOnce() -> Result<J>,
    J: Iterator<Item = Result<T>>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(init) = self.init.take() {
            match init() {
                Ok(iter) => self.iter = Some(iter),
                Err(err) => return Some(Err(err)),
            }
        }
        self.iter.as_mut()?.next()
    }
}
