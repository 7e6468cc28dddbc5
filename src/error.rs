//! Errors raised while building a table from a [`TableConfig`](crate::TableConfig).

use thiserror::Error as ThisError;

/// Reasons a table configuration is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum ConfigError {
    /// A table needs at least one bucket.
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
    /// The requested capacity could never be doubled on resize.
    #[error("initial capacity {requested} exceeds the maximum of {max}")]
    CapacityTooLarge {
        /// Capacity asked for
        requested: usize,
        /// Largest accepted capacity
        max: usize,
    },
}

/// Result alias for fallible table construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
