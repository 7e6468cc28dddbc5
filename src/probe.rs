//! Randomized probe offsets and the slot sequence they induce.
//!
//! Every backing array gets its own random permutation of `0..capacity`. Probing from a home
//! slot `h` visits `(h + offsets[i]) % capacity` for each `i` in order, so a probe walk touches
//! every slot exactly once before it runs out.

use std::slice;

use rand::Rng;
use rand::seq::SliceRandom;

/// Returns a uniformly random permutation of `0..capacity` drawn from `rng`.
///
/// The result only depends on `capacity` and the state of `rng`, so a seeded generator
/// reproduces the same permutation.
pub fn random_offsets<R: Rng + ?Sized>(capacity: usize, rng: &mut R) -> Vec<usize> {
    let mut offsets: Vec<usize> = (0..capacity).collect();
    offsets.shuffle(rng);
    offsets
}

/// Iterator over the slots probed for a key, in probe order.
#[derive(Debug, Clone)]
pub struct ProbeSequence<'a> {
    /// Home slot of the key
    home: usize,
    /// Number of slots in the table being probed
    capacity: usize,
    /// Remaining offsets of the table's permutation
    offsets: slice::Iter<'a, usize>,
}

impl<'a> ProbeSequence<'a> {
    /// Starts a probe walk at `home` over a table whose permutation is `offsets`.
    ///
    /// The table's capacity is the permutation's length.
    #[must_use]
    pub fn new(home: usize, offsets: &'a [usize]) -> Self {
        Self { home, capacity: offsets.len(), offsets: offsets.iter() }
    }
}

impl Iterator for ProbeSequence<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offsets.next()?;
        self.home.wrapping_add(*offset).checked_rem(self.capacity)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl ExactSizeIterator for ProbeSequence<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_offsets_are_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        for capacity in [1, 2, 8, 13, 64, 1000] {
            let mut offsets = random_offsets(capacity, &mut rng);
            assert_eq!(offsets.len(), capacity);
            offsets.sort_unstable();
            assert_eq!(offsets, (0..capacity).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_offsets_empty_capacity() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert!(random_offsets(0, &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_offsets() {
        let first = random_offsets(256, &mut SmallRng::seed_from_u64(42));
        let second = random_offsets(256, &mut SmallRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_offsets_are_shuffled() {
        // A fixed seed over 256 slots yielding the identity would mean no shuffle happened.
        let offsets = random_offsets(256, &mut SmallRng::seed_from_u64(42));
        assert_ne!(offsets, (0..256).collect::<Vec<_>>());
    }

    #[test]
    fn test_sequence_covers_every_slot_once() {
        let mut rng = SmallRng::seed_from_u64(3);
        let offsets = random_offsets(32, &mut rng);

        for home in [0, 5, 31] {
            let sequence = ProbeSequence::new(home, &offsets);
            assert_eq!(sequence.len(), 32);

            let mut slots: Vec<usize> = sequence.collect();
            slots.sort_unstable();
            assert_eq!(slots, (0..32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_sequence_follows_offsets() {
        let offsets = [0, 3, 1, 2];
        let slots: Vec<usize> = ProbeSequence::new(2, &offsets).collect();
        assert_eq!(slots, vec![2, 1, 3, 0]);
    }
}
