//! Error types for stream pipelines.
//!
//! Every stage yields `Result<(K, V), StreamError>`; whichever pull produced an
//! error is the pull that reports it. Nothing is retried or swallowed inside the
//! crate. The only interception point is [`finalize`](crate::Stream::finalize),
//! which runs its cleanup and then lets the error through.
//!
//! # Examples
//!
//! ```
//! use datastream::{Stream, StreamError};
//!
//! let mut s = Stream::from_values(Vec::<i32>::new()).if_empty();
//! let err = s.to_vec().unwrap_err();
//! assert!(matches!(err, StreamError::Empty { .. }));
//! ```

use std::fmt::Display;

/// Root error type for all stream operations.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// API misuse: re-iterating a closed stream, reading state before the
    /// iteration milestone it depends on, or an invalid stage configuration.
    #[error("{0}")]
    Logic(String),

    /// Positional or keyed access with a key that does not exist.
    #[error("{message}")]
    OutOfBounds {
        /// Rendered key that was requested.
        key: String,
        /// Human readable description.
        message: String,
    },

    /// A key that is neither a scalar nor an identity key.
    #[error("{0}")]
    Unsupported(String),

    /// Raised by `if_empty` when nothing was produced and no fallback was given.
    #[error("{message}")]
    Empty {
        /// Description of the failure.
        message: String,
    },

    /// Raised by `overflow` once more than `capacity` entries were pulled.
    #[error("Defined capacity of {capacity} items exceeded.")]
    Overflow {
        /// The configured capacity.
        capacity: usize,
    },

    /// Error raised by a user supplied callable (or a custom stage error).
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}

impl StreamError {
    /// Create a logic error with the given message.
    pub fn logic(message: impl Into<String>) -> Self {
        Self::Logic(message.into())
    }

    /// Create an out-of-bounds error for `key`.
    pub fn out_of_bounds(key: impl Display, message: impl Into<String>) -> Self {
        Self::OutOfBounds {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// Create an unsupported-key error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// The default error raised by an empty stream guarded with `if_empty`.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty {
            message: "Stream is empty.".to_string(),
        }
    }

    /// The default error raised by `overflow`.
    #[must_use]
    pub const fn overflow(capacity: usize) -> Self {
        Self::Overflow { capacity }
    }

    /// Wrap an arbitrary user error.
    pub fn callback(error: impl Into<anyhow::Error>) -> Self {
        Self::Callback(error.into())
    }

    /// Whether this is an API misuse error.
    #[must_use]
    pub const fn is_logic(&self) -> bool {
        matches!(self, Self::Logic(_))
    }

    /// Whether this is an out-of-bounds access error.
    #[must_use]
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

/// Specialized `Result` for stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;
