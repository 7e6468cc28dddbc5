//! Storage slot of the table.

use std::fmt;
use std::mem;

/// A single slot of the table's backing array.
///
/// The variant is the slot's occupancy tag. Only an occupied bucket carries a key and a value,
/// so there is no way to read a stale pair out of a never-used or removed slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Bucket {
    /// Untouched since the backing array was allocated. A lookup that reaches it stops.
    #[default]
    NeverUsed,
    /// Held an entry that has been removed. Lookups probe past it, inserts may reuse it.
    Tombstone,
    /// Holds a live key-value pair.
    Occupied {
        /// The key stored in the bucket
        key: String,
        /// The value associated with the key
        value: i64,
    },
}

impl Bucket {
    /// Stores the pair in this bucket, overwriting whatever state it had.
    pub fn load(&mut self, key: String, value: i64) {
        *self = Self::Occupied { key, value };
    }

    /// Marks an occupied bucket as removed and hands back its pair.
    ///
    /// Buckets that are not occupied are left untouched.
    pub fn remove(&mut self) -> Option<(String, i64)> {
        match mem::replace(self, Self::Tombstone) {
            Self::Occupied { key, value } => Some((key, value)),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Returns true if the bucket can take a new entry (never used or removed).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !matches!(self, Self::Occupied { .. })
    }

    /// Returns true only for a bucket that has never held an entry.
    #[must_use]
    pub fn is_never_used(&self) -> bool {
        matches!(self, Self::NeverUsed)
    }

    /// Returns true for a bucket whose entry has been removed.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone)
    }

    /// The stored key, if occupied.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Occupied { key, .. } => Some(key.as_str()),
            Self::NeverUsed | Self::Tombstone => None,
        }
    }

    /// The stored value, if occupied.
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Occupied { value, .. } => Some(*value),
            Self::NeverUsed | Self::Tombstone => None,
        }
    }

    /// Mutable access to the stored value, if occupied.
    pub fn value_mut(&mut self) -> Option<&mut i64> {
        match self {
            Self::Occupied { value, .. } => Some(value),
            Self::NeverUsed | Self::Tombstone => None,
        }
    }

    /// Borrowed view of the pair, if occupied.
    #[must_use]
    pub fn entry(&self) -> Option<(&str, i64)> {
        match self {
            Self::Occupied { key, value } => Some((key.as_str(), *value)),
            Self::NeverUsed | Self::Tombstone => None,
        }
    }

    /// Consumes the bucket, yielding its pair if occupied.
    #[must_use]
    pub fn into_entry(self) -> Option<(String, i64)> {
        match self {
            Self::Occupied { key, value } => Some((key, value)),
            Self::NeverUsed | Self::Tombstone => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied { key, value } => write!(f, "<{key}, {value}>"),
            Self::Tombstone => f.write_str("<removed>"),
            Self::NeverUsed => f.write_str("<never used>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bucket_is_never_used() {
        let bucket = Bucket::default();
        assert!(bucket.is_empty());
        assert!(bucket.is_never_used());
        assert_eq!(bucket.key(), None);
        assert_eq!(bucket.value(), None);
    }

    #[test]
    fn test_load() {
        let mut bucket = Bucket::default();
        bucket.load("James".to_string(), 4815);

        assert!(!bucket.is_empty());
        assert!(!bucket.is_never_used());
        assert_eq!(bucket.key(), Some("James"));
        assert_eq!(bucket.value(), Some(4815));
        assert_eq!(bucket.entry(), Some(("James", 4815)));
    }

    #[test]
    fn test_load_overwrites() {
        let mut bucket = Bucket::Tombstone;
        bucket.load("Hugo".to_string(), 42108);
        bucket.load("Juliet".to_string(), 1623);
        assert_eq!(bucket.entry(), Some(("Juliet", 1623)));
    }

    #[test]
    fn test_remove_leaves_tombstone() {
        let mut bucket = Bucket::default();
        bucket.load("Hugo".to_string(), 42108);

        assert_eq!(bucket.remove(), Some(("Hugo".to_string(), 42108)));
        assert!(bucket.is_empty());
        assert!(bucket.is_tombstone());
        assert!(!bucket.is_never_used());
        assert_eq!(bucket.key(), None);
    }

    #[test]
    fn test_remove_empty_is_noop() {
        let mut bucket = Bucket::NeverUsed;
        assert_eq!(bucket.remove(), None);
        assert!(bucket.is_never_used());

        let mut bucket = Bucket::Tombstone;
        assert_eq!(bucket.remove(), None);
        assert!(bucket.is_tombstone());
    }

    #[test]
    fn test_value_mut() {
        let mut bucket = Bucket::default();
        assert_eq!(bucket.value_mut(), None);

        bucket.load("James".to_string(), 1);
        if let Some(value) = bucket.value_mut() {
            *value += 10;
        }
        assert_eq!(bucket.value(), Some(11));
    }

    #[test]
    fn test_display() {
        let mut bucket = Bucket::default();
        assert_eq!(bucket.to_string(), "<never used>");
        bucket.load("James".to_string(), 4815);
        assert_eq!(bucket.to_string(), "<James, 4815>");
        bucket.remove();
        assert_eq!(bucket.to_string(), "<removed>");
    }
}
