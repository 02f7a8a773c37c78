//! Random shape permutations.
//!
//! All randomness in the game flows through a [`Shuffler`], so a session
//! built from a fixed seed replays the same puzzles.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shapes::{ShapeAssignment, ShapeKind};

/// Seedable source of shuffles.
#[derive(Debug, Clone)]
pub struct Shuffler {
    rng: StdRng,
}

impl Shuffler {
    /// Creates a deterministic shuffler.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a shuffler seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Builds a shuffler from an optional seed.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }

    /// Shuffles a slice in place using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.rng.random_range(0..=i);
            slice.swap(i, j);
        }
    }

    /// A uniformly random permutation of circle, triangle and square.
    pub fn shapes(&mut self) -> ShapeAssignment {
        let mut shapes = ShapeKind::ALL;
        self.shuffle(&mut shapes);
        shapes
    }

    /// A uniformly random index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_shapes_is_a_permutation() {
        let mut shuffler = Shuffler::seeded(7);
        for _ in 0..200 {
            let mut shapes = shuffler.shapes();
            shapes.sort();
            assert_eq!(shapes, ShapeKind::ALL);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut first = Shuffler::seeded(12345);
        let mut second = Shuffler::seeded(12345);
        for _ in 0..50 {
            assert_eq!(first.shapes(), second.shapes());
        }
    }

    #[test]
    fn test_all_six_permutations_are_roughly_uniform() {
        let mut shuffler = Shuffler::seeded(2024);
        let mut counts: FxHashMap<ShapeAssignment, usize> = FxHashMap::default();
        for _ in 0..6000 {
            *counts.entry(shuffler.shapes()).or_default() += 1;
        }

        assert_eq!(counts.len(), 6, "every permutation should appear");
        for (permutation, count) in &counts {
            assert!(
                (800..=1200).contains(count),
                "{permutation:?} drawn {count} times out of 6000"
            );
        }
    }

    #[test]
    fn test_shuffle_keeps_pool_contents() {
        let mut shuffler = Shuffler::seeded(3);
        let mut pool = [1, 1, 2, 2, 4, 4];
        shuffler.shuffle(&mut pool);
        pool.sort();
        assert_eq!(pool, [1, 1, 2, 2, 4, 4]);
    }
}
