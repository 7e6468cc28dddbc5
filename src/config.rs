//! Construction options for [`HashTable`](crate::HashTable).

use crate::error::{ConfigError, Result};

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 8;

/// Largest initial capacity accepted by [`TableConfig::validate`].
pub const MAX_CAPACITY: usize = 1 << 30;

/// Options for building a table.
///
/// ```rust
/// use randprobe::{HashTable, TableConfig};
///
/// let config = TableConfig::new().with_initial_capacity(32).with_seed(7);
/// let table = HashTable::from_config(&config).unwrap();
/// assert_eq!(table.capacity(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Number of buckets allocated up front
    pub initial_capacity: usize,
    /// Seed for the probe-offset generator; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_CAPACITY, seed: None }
    }
}

impl TableConfig {
    /// Creates a configuration with the default capacity and an OS-seeded generator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of buckets allocated up front
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Fixes the seed of the probe-offset generator, making bucket placement reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration describes a usable table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] for a zero capacity and
    /// [`ConfigError::CapacityTooLarge`] above [`MAX_CAPACITY`].
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.initial_capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                requested: self.initial_capacity,
                max: MAX_CAPACITY,
            });
        }
        Ok(())
    }
}
