//! Terminal collectors.
//!
//! A collector takes ownership of a stream and materializes it into some
//! structure. Collectors are handed to [`Stream::collect`](crate::Stream::collect)
//! as factories, so any type with a `fn(Stream) -> Result<Self>` constructor
//! plugs in:
//!
//! ```
//! use datastream::collectors::{Collector, ListCollector};
//! use datastream::Stream;
//!
//! # fn main() -> datastream::Result<()> {
//! let list = Stream::from_values(vec!["a", "b"]).collect(ListCollector::new)?;
//! assert_eq!(list.value(), &["a", "b"]);
//! assert!(list.is_closed());
//! # Ok(())
//! # }
//! ```
//!
//! - [`ListCollector`] -- values in order, positional access.
//! - [`IndexedCollector`] -- entries in order plus a multi-valued index by key.
//! - [`CursoredCollector`] -- one page of a stream, with offsets for the
//!   previous and next page.

mod cursored;
mod indexed;
mod list;

pub use cursored::{Cursor, CursoredCollector, Page};
pub use indexed::{IndexKey, IndexedCollector, KeyRef, ScalarKey};
pub use list::ListCollector;

pub(crate) use indexed::Index;

use crate::aggregator::Aggregated;
use crate::error::Result;

/// Common surface of all collectors.
pub trait Collector {
    /// What [`value`](Self::value) returns.
    type Value<'c>
    where
        Self: 'c;

    /// The collected result.
    fn value(&self) -> Self::Value<'_>;

    /// Aggregator values of the collected stream.
    ///
    /// # Errors
    /// A logic error when the values are not available yet.
    fn aggregated(&self) -> Result<Aggregated>;

    /// Whether the underlying stream has been iterated.
    fn is_closed(&self) -> bool;
}
