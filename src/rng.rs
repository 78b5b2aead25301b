//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for an
//! optimization run. It wraps the `rand` crate's `StdRng`, is seeded exactly once, and
//! every stochastic decision of every algorithm draws from it. Two generators built
//! from the same seed and drawn in the same order yield identical sequences.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::from_seed(7);
//! let mut b = RandomNumberGenerator::from_seed(7);
//!
//! assert_eq!(a.uniform(-5.0, 5.0), b.uniform(-5.0, 5.0));
//! assert_eq!(a.uniform_int(0, 10), b.uniform_int(0, 10));
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

/// A seeded wrapper around `StdRng` that provides the draws the algorithms need.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    rng: StdRng,
    seed: u64,
}

impl RandomNumberGenerator {
    /// Creates a new generator whose seed is drawn once from system entropy.
    ///
    /// The drawn seed is available through [`RandomNumberGenerator::seed`] so the run
    /// can be replayed with [`RandomNumberGenerator::from_seed`].
    pub fn new() -> Self {
        let seed = StdRng::from_entropy().gen::<u64>();
        Self::from_seed(seed)
    }

    /// Creates a new generator with a specific seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a real number in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws a real number in `[-1, 1)`.
    pub fn symmetric(&mut self) -> f64 {
        2.0 * self.unit() - 1.0
    }

    /// Draws a real number in `[lo, hi)`.
    ///
    /// A degenerate interval (`lo == hi`) returns `lo`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    /// Draws an integer in `[lo, hi)`. Returns `lo` when the range is empty.
    pub fn uniform_int(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Draws an index in `[0, len)` different from `excluded`, using a single draw.
    ///
    /// `len` must be at least 2; with fewer slots `excluded` itself cannot be avoided
    /// and `0` is returned.
    pub fn index_except(&mut self, len: usize, excluded: usize) -> usize {
        if len < 2 {
            return 0;
        }
        let index = self.uniform_int(0, len - 1);
        if index >= excluded {
            index + 1
        } else {
            index
        }
    }

    /// Generates a specified number of random numbers within the given range.
    ///
    /// # Parameters
    ///
    /// - `from`: The lower bound of the range (inclusive).
    /// - `to`: The upper bound of the range (exclusive).
    /// - `num`: The number of random numbers to generate.
    ///
    /// # Returns
    ///
    /// A `VecDeque` containing the generated random numbers, in draw order.
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> VecDeque<f64> {
        let mut uniform_numbers = VecDeque::with_capacity(num);
        uniform_numbers.extend((0..num).map(|_| self.uniform(from, to)));
        uniform_numbers
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
