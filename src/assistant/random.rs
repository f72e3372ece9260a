//! Random sources for reply selection, thinking delay and confidence scores.
//!
//! Handlers never touch `rand` directly; they go through [`RandomSource`] so
//! tests can pin the outcome with [`SeededRandom`].

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send + Sync {
    /// Uniform value in `[low, high]`. `low == high` returns `low`.
    fn uniform(&self, low: f64, high: f64) -> f64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn index(&self, len: usize) -> usize;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        rand::rng().random_range(low..=high)
    }

    fn index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Deterministic generator shared behind a lock.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        self.rng.lock().random_range(low..=high)
    }

    fn index(&self, len: usize) -> usize {
        self.rng.lock().random_range(0..len)
    }
}
