//! # Random-Probe Hash Table
//!
//! An open-addressing hash table from `String` keys to `i64` values.
//!
//! Collisions are resolved by walking a random permutation of slot offsets. Each backing array
//! draws its own permutation from the table's random generator, so the probe order differs
//! between tables but stays fixed for the lifetime of one array. Removed entries leave
//! tombstones, and the table doubles in size once more than half of its buckets are occupied.
//!
//! ## Basic Usage
//!
//! ```rust
//! use randprobe::HashTable;
//!
//! // Create a new table with 8 buckets
//! let mut table = HashTable::new();
//!
//! // Insert values, duplicates are rejected
//! assert!(table.insert("James", 4815));
//! assert!(table.insert("Juliet", 1623));
//! assert!(!table.insert("James", 9999));
//!
//! // Retrieve values
//! assert_eq!(table.get("James"), Some(4815));
//! assert_eq!(table.alpha(), 0.25);
//!
//! // Update values in place
//! if let Some(value) = table.get_mut("James") {
//!     *value += 1;
//! }
//! assert_eq!(table.get("James"), Some(4816));
//!
//! // Remove values
//! assert!(table.remove("Juliet"));
//! assert_eq!(table.get("Juliet"), None);
//! ```
//!
//! ## Reproducible Layouts
//!
//! ```rust
//! use randprobe::HashTable;
//!
//! let mut first = HashTable::with_seed(8, 42);
//! let mut second = HashTable::with_seed(8, 42);
//! for table in [&mut first, &mut second] {
//!     table.insert("Hugo", 42108);
//!     table.insert("Kate", 1);
//! }
//!
//! // Same seed, same buckets
//! assert_eq!(first.to_string(), second.to_string());
//! ```

/// Module implementing the table's storage slots
pub mod bucket;
/// Table construction options
mod config;
/// Errors raised by table construction
mod error;
/// Module implementing the open-addressing table
mod hash_table;
/// Probe-offset permutations and probe sequences
pub mod probe;

pub use bucket::Bucket;
pub use config::{DEFAULT_CAPACITY, MAX_CAPACITY, TableConfig};
pub use error::{ConfigError, Result};
pub use hash_table::{HashTable, Iter};
