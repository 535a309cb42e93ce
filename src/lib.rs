//! # Datastream
//!
//! Lazy, single-pass, composable **key/value stream pipelines** for Rust.
//! Wrap any sequence of `(key, value)` entries in a [`Stream`], chain stages
//! (filter, map, buffer, join, distinct, ...), attach named aggregations that
//! are computed during the same pass, and finish with a terminal operation.
//!
//! ## Key Features
//!
//! - **Lazy** - nothing is pulled until the outermost stream is iterated
//! - **Single pass** - a stream can be iterated once; a second attempt is an error
//! - **Side-channel aggregation** - any number of reducers observe one traversal
//! - **Keys preserved** - entries keep their keys through most stages, for joins and indexing
//! - **Deterministic cleanup** - `finalize` runs exactly once, even on early abandonment
//! - **Typed extension points** - custom stages, reducers and collectors plug in via traits and factories
//!
//! ## Quick Start
//!
//! ```
//! use datastream::reducers::{Count, Sum};
//! use datastream::Stream;
//!
//! # fn main() -> datastream::Result<()> {
//! let orders = vec![("alice", 30), ("bob", 5), ("carol", 12)];
//!
//! let mut large = Stream::from_entries(orders)
//!     .filter(|amount, _customer| *amount >= 10)
//!     .aggregate("count", Count::new())
//!     .aggregate("total", Sum::new())
//!     .map(|amount, customer| format!("{customer}: {amount}"));
//!
//! assert_eq!(large.to_values()?, vec!["alice: 30", "carol: 12"]);
//!
//! let aggregated = large.final_aggregated()?;
//! assert_eq!(aggregated.value::<usize>("count")?, 2);
//! assert_eq!(aggregated.value::<i32>("total")?, 42);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Stream
//!
//! A [`Stream<'a, K, V>`](Stream) is a deferred sequence of `(K, V)` entries.
//! Every stage consumes its upstream by value and returns a new stream. Keys
//! need not be unique: a stream is a sequence, not a map.
//!
//! Each stream tracks whether iteration was *started* ([`Stream::is_closed`])
//! and whether it *finished* ([`Stream::is_exhausted`]). Reading aggregated
//! values requires the first; reading final values requires the second.
//!
//! ### Sources
//!
//! Anything implementing [`Source`] can start or feed a pipeline: vectors and
//! arrays of pairs, `BTreeMap`, `HashMap`, a [`Buffer`], another [`Stream`], or
//! arbitrary iterators through [`source::Entries`] and [`source::Values`].
//!
//! ### Stages
//!
//! #### Element-wise
//! - [`map`](Stream::map), [`map_keys`](Stream::map_keys), [`map_both`](Stream::map_both), [`try_map`](Stream::try_map)
//! - [`filter`](Stream::filter), [`try_filter`](Stream::try_filter)
//! - [`tap`](Stream::tap) - side effect per entry
//!
//! #### Prefixes and uniqueness
//! - [`take`](Stream::take), [`skip`](Stream::skip), [`take_until`](Stream::take_until)
//! - [`distinct`](Stream::distinct), [`distinct_by`](Stream::distinct_by)
//!
//! #### Reshaping
//! - [`flatten`](Stream::flatten), [`flatten_keyed`](Stream::flatten_keyed)
//! - [`merge`](Stream::merge) - one source after the other
//! - [`reverse`](Stream::reverse), [`sort`](Stream::sort), [`sort_keys`](Stream::sort_keys) - materialize the upstream
//!
//! #### Batching and joins
//! - [`buffer_count`](Stream::buffer_count), [`buffer_while`](Stream::buffer_while) - yield [`Buffer`]s
//! - [`compress_join`](Stream::compress_join) - run-length grouping of adjacent entries
//! - [`left_join`](Stream::left_join) - keyed join with list-valued matches
//!
//! #### Guards
//! - [`if_empty`](Stream::if_empty), [`if_empty_then`](Stream::if_empty_then)
//! - [`overflow`](Stream::overflow) - capacity limit
//! - [`finalize`](Stream::finalize) - guaranteed cleanup
//!
//! Custom stages attach through [`Stream::operator`].
//!
//! ### Reducers and Aggregators
//!
//! The [`reducers`] module provides stateful accumulators implementing
//! [`Reducer`]: [`Count`](reducers::Count), [`Sum`](reducers::Sum),
//! [`Min`](reducers::Min) / [`Max`](reducers::Max),
//! [`Average`](reducers::Average) and [`Callback`](reducers::Callback).
//! Use them with [`Stream::reduce`] to get a single value, or with
//! [`Stream::aggregate`] to observe a pipeline without consuming it.
//!
//! ### Collectors
//!
//! The [`collectors`] module materializes streams:
//! [`ListCollector`](collectors::ListCollector),
//! [`IndexedCollector`](collectors::IndexedCollector) and
//! [`CursoredCollector`](collectors::CursoredCollector) for paging.
//!
//! ## Errors
//!
//! Every stage yields `Result<(K, V), StreamError>`. See [`StreamError`] for
//! the taxonomy; errors from user closures travel as
//! [`StreamError::Callback`].
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]: stream open/exhaust at `TRACE`,
//! materializations and finalizers at `DEBUG`, aggregator name shadowing at
//! `WARN`. No subscriber is installed by the library.
//!
//! ## Testing
//!
//! The [`testing`] module provides assertion helpers, entry builders, a
//! [`PullCounter`](testing::PullCounter) probe and debug stages.

pub mod aggregator;
pub mod buffer;
pub mod collectors;
pub mod error;
pub mod item;
pub mod operators;
pub mod reducers;
pub mod source;
pub mod stream;
pub mod testing;

// Re-exports
pub use aggregator::{Aggregated, Aggregator, AggregatorHandle, Aggregators};
pub use buffer::{Buffer, DEFAULT_BUFFER_SIZE};
pub use collectors::{Collector, CursoredCollector, IndexedCollector, ListCollector, Page};
pub use error::{Result, StreamError};
pub use item::{Field, Item};
pub use reducers::{Reducer, ReducerExt};
pub use source::Source;
pub use stream::{BoxedEntries, Stream, StreamIter, Upstream};
