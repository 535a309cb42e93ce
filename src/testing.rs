//! Testing utilities for stream pipelines.
//!
//! Helpers for writing tests against pipelines built with this crate:
//!
//! - **Assertions**: compare drained entries, values or keys with expectations
//! - **Builders**: assemble entry lists fluently
//! - **Probes**: observe how many entries a stage pulled, to check laziness
//! - **Debug utilities**: log entries as they flow past, through `tracing`
//!
//! # Quick Start
//!
//! ```
//! use datastream::testing::*;
//! use datastream::Stream;
//!
//! # fn main() -> anyhow::Result<()> {
//! let entries = EntriesBuilder::new().add("a", 1).add("b", 2).add("c", 3).build();
//!
//! let mut s = Stream::from_entries(entries).filter(|v, _k| v % 2 == 1);
//! assert_entries_equal(&s.to_vec()?, &[("a", 1), ("c", 3)]);
//! # Ok(())
//! # }
//! ```
//!
//! # Checking that a stage does not over-pull
//!
//! ```
//! use datastream::testing::PullCounter;
//! use datastream::Stream;
//!
//! # fn main() -> anyhow::Result<()> {
//! let counter = PullCounter::new();
//! let mut s = counter
//!     .wrap(Stream::from_values(vec![1, 2, 3, 4]))
//!     .take_until(|v, _k| *v == 2);
//!
//! assert_eq!(s.to_values()?, vec![1]);
//! assert_eq!(counter.pulls(), 2);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod builders;
pub mod debug;
pub mod probes;

pub use assertions::*;
pub use builders::*;
pub use debug::*;
pub use probes::*;
