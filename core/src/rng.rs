//! Injectable randomness for every engine.
//!
//! Engines never reach for a global generator. Callers hand in a
//! [`RandomSource`], which is [`SeededRandom`] in production and a scripted
//! sequence in tests that need exact control over spawns and placements.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform index in `0..bound`, `bound` must be non-zero.
    fn index(&mut self, bound: usize) -> usize;

    /// Returns `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;

    /// Fisher-Yates shuffle driven by [`RandomSource::index`].
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn index(&mut self, bound: usize) -> usize {
        (**self).index(bound)
    }

    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }
}

/// Reproducible source backed by a small fast PRNG.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    seed: u64,
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}
