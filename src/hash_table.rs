use std::fmt;
use std::mem;
use std::slice;

use log::{debug, trace};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::bucket::Bucket;
use crate::config::{DEFAULT_CAPACITY, TableConfig};
use crate::error::Result;
use crate::probe::{ProbeSequence, random_offsets};

/// Multiplier of the polynomial string hash.
const HASH_MULTIPLIER: usize = 33;

/// An open-addressing hash table mapping strings to integers.
///
/// Collisions are resolved by walking a random permutation of slot offsets that is drawn once
/// per backing array. Removed entries leave tombstones so later lookups keep probing past them.
/// The table doubles its capacity as soon as more than half of the buckets are occupied.
///
/// Note: This implementation is not thread-safe. Mutation needs exclusive access.
#[derive(Debug, Clone)]
pub struct HashTable {
    /// The buckets storing the key-value pairs
    buckets: Vec<Bucket>,
    /// Permutation of `0..capacity` used to probe away from a key's home slot
    probe_offsets: Vec<usize>,
    /// Number of occupied buckets
    len: usize,
    /// Number of removed buckets not yet reclaimed by an insert or a resize
    tombstones: usize,
    /// Source of the probe-offset permutations
    rng: SmallRng,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<(String, i64)> for HashTable {
    /// Inserts every pair; pairs whose key is already present are skipped.
    fn extend<T: IntoIterator<Item = (String, i64)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl FromIterator<(String, i64)> for HashTable {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Polynomial rolling hash `h = h * 33 + byte`, reduced modulo `capacity`.
fn polynomial_hash(key: &str, capacity: usize) -> usize {
    key.bytes()
        .fold(0_usize, |hash, byte| {
            hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(usize::from(byte))
        })
        .checked_rem(capacity)
        .unwrap_or(0)
}

impl HashTable {
    /// Creates an empty table with 8 buckets and an OS-seeded probe generator
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with the given number of buckets.
    ///
    /// A capacity of zero is raised to one. Use [`HashTable::from_config`] to have it rejected
    /// instead.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_rng(capacity, SmallRng::from_os_rng())
    }

    /// Creates an empty table whose probe permutations are drawn from a seeded generator.
    ///
    /// Two tables built with the same capacity and seed place the same inserts in the same
    /// buckets, across resizes too.
    #[must_use]
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, SmallRng::seed_from_u64(seed))
    }

    /// Creates an empty table from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`](crate::ConfigError) reported by [`TableConfig::validate`].
    pub fn from_config(config: &TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(match config.seed {
            Some(seed) => Self::with_seed(config.initial_capacity, seed),
            None => Self::with_capacity(config.initial_capacity),
        })
    }

    /// Allocates `capacity` never-used buckets and their permutation.
    fn with_rng(capacity: usize, mut rng: SmallRng) -> Self {
        let capacity = capacity.max(1);
        let probe_offsets = random_offsets(capacity, &mut rng);
        debug!("allocated hash table with {capacity} buckets");

        Self { buckets: vec![Bucket::NeverUsed; capacity], probe_offsets, len: 0, tombstones: 0, rng }
    }

    /// Hashes a key to its home slot under the current capacity.
    ///
    /// The result changes whenever the table resizes.
    #[must_use]
    pub fn hash(&self, key: &str) -> usize {
        polynomial_hash(key, self.capacity())
    }

    /// Slots to visit for `key`, starting at its home slot.
    fn probe(&self, key: &str) -> ProbeSequence<'_> {
        ProbeSequence::new(self.hash(key), &self.probe_offsets)
    }

    /// Walks the probe sequence of `key`, returning the bucket holding it and the number of
    /// buckets examined.
    fn locate(&self, key: &str) -> (Option<usize>, usize) {
        let mut probes: usize = 0;
        for slot in self.probe(key) {
            probes = probes.saturating_add(1);
            let Some(bucket) = self.buckets.get(slot) else { break };
            if bucket.is_never_used() {
                return (None, probes);
            }
            if bucket.key() == Some(key) {
                return (Some(slot), probes);
            }
        }
        trace!("probed all {probes} buckets for {key:?} without reaching a never-used one");
        (None, probes)
    }

    /// Returns the index of the bucket holding `key`.
    ///
    /// The walk stops at the first never-used bucket: an insert never passes one, so the key
    /// cannot sit further along. Tombstones are stepped over.
    #[must_use]
    pub fn get_index(&self, key: &str) -> Option<usize> {
        self.locate(key).0
    }

    /// Number of buckets a lookup of `key` examines, whether or not the key is present.
    #[must_use]
    pub fn probe_len(&self, key: &str) -> usize {
        self.locate(key).1
    }

    /// Inserts a key-value pair.
    ///
    /// Returns `false` and leaves the table untouched if the key is already present. The pair
    /// goes into the first empty bucket of the key's probe sequence, never-used or removed.
    /// If the insert pushes the load factor above one half, the table doubles its capacity.
    pub fn insert(&mut self, key: impl Into<String>, value: i64) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }

        let mut target = None;
        for slot in self.probe(&key) {
            match self.buckets.get(slot) {
                Some(bucket) if bucket.key() == Some(key.as_str()) => return false,
                Some(bucket) if bucket.is_empty() => {
                    target = Some(slot);
                    break;
                }
                _ => {}
            }
        }

        let Some(bucket) = target.and_then(|slot| self.buckets.get_mut(slot)) else {
            return false;
        };
        if bucket.is_tombstone() {
            self.tombstones = self.tombstones.saturating_sub(1);
        }
        bucket.load(key, value);
        self.len = self.len.saturating_add(1);

        if self.len.saturating_mul(2) > self.capacity() {
            self.grow();
        }
        true
    }

    /// Moves every entry into a fresh array of twice the capacity with a fresh permutation.
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.saturating_mul(2);
        let probe_offsets = random_offsets(new_capacity, &mut self.rng);
        let mut buckets = vec![Bucket::NeverUsed; new_capacity];

        for (key, value) in mem::take(&mut self.buckets).into_iter().filter_map(Bucket::into_entry) {
            let home = polynomial_hash(&key, new_capacity);
            let slot = ProbeSequence::new(home, &probe_offsets)
                .find(|&slot| buckets.get(slot).is_some_and(Bucket::is_empty));
            if let Some(bucket) = slot.and_then(|slot| buckets.get_mut(slot)) {
                bucket.load(key, value);
            }
        }

        debug!(
            "resized hash table from {old_capacity} to {new_capacity} buckets, moved {} entries, dropped {} tombstones",
            self.len, self.tombstones
        );
        self.buckets = buckets;
        self.probe_offsets = probe_offsets;
        self.tombstones = 0;
    }

    /// Inserts the pair, or overwrites the value if the key is already present.
    ///
    /// Returns the previous value when there was one.
    pub fn upsert(&mut self, key: impl Into<String>, value: i64) -> Option<i64> {
        let key = key.into();
        if let Some(current) = self.get_mut(&key) {
            return Some(mem::replace(current, value));
        }
        self.insert(key, value);
        None
    }

    /// Removes `key`, leaving a tombstone in its bucket.
    ///
    /// Returns `false` if the key was not present. Removal never shrinks the table.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(bucket) = self.get_index(key).and_then(|slot| self.buckets.get_mut(slot)) else {
            return false;
        };
        if bucket.remove().is_none() {
            return false;
        }
        self.len = self.len.saturating_sub(1);
        self.tombstones = self.tombstones.saturating_add(1);
        true
    }

    /// Returns true if the table holds `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get_index(key).is_some()
    }

    /// Retrieve the value stored for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<i64> {
        self.get_index(key).and_then(|slot| self.buckets.get(slot)).and_then(Bucket::value)
    }

    /// Get a mutable reference to the value stored for `key`.
    ///
    /// The reference borrows the table, so it cannot be held across an insert that might
    /// resize the backing array.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut i64> {
        let slot = self.get_index(key)?;
        self.buckets.get_mut(slot)?.value_mut()
    }

    /// Keys of all occupied buckets, in bucket order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    /// Returns an iterator over the key-value pairs, in bucket order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { buckets: self.buckets.iter() }
    }

    /// Removes every entry and tombstone, keeping the capacity and the probe permutation
    pub fn clear(&mut self) {
        self.buckets.fill(Bucket::NeverUsed);
        self.len = 0;
        self.tombstones = 0;
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of removed buckets still awaiting reuse.
    ///
    /// Tombstones lengthen lookups but do not count towards the load factor, so a table that
    /// sees many removes can slow down without ever resizing.
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the load factor, occupied buckets over capacity
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn alpha(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }
}

/// Renders one `Bucket <index>: <key, value>` line per occupied bucket, in bucket order.
impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            if !bucket.is_empty() {
                writeln!(f, "Bucket {index}: {bucket}")?;
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, i64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of the hash table
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Buckets not yet visited
    buckets: slice::Iter<'a, Bucket>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, i64);

    fn next(&mut self) -> Option<Self::Item> {
        self.buckets.find_map(Bucket::entry)
    }
}
