//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and
//! provides the sampling primitives the tour domain needs: uniform indices,
//! distinct index pairs, samples without replacement, and depot-free
//! permutations.
//!
//! Every generator can be constructed from an explicit seed, which is how the
//! coordinator derives reproducible per-island RNGs from the master seed.
//!
//! ## Example
//!
//! ```rust
//! use archipelago::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let perm = rng.permutation(1, 6);
//!
//! assert_eq!(perm.len(), 5);
//! ```

use rand::seq::{index, SliceRandom};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` that provides the sampling
/// operations used by the genetic operators and population generation.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a uniform random index in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn gen_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Generates a uniform random value in `[0.0, 1.0)`.
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Generates two distinct indices in `[low, bound)`, returned in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if the range contains fewer than two values.
    pub fn distinct_pair(&mut self, low: usize, bound: usize) -> (usize, usize) {
        debug_assert!(bound - low >= 2);
        let first = self.rng.gen_range(low..bound);
        let mut second = self.rng.gen_range(low..bound);
        while second == first {
            second = self.rng.gen_range(low..bound);
        }
        if first < second {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Samples `amount` distinct indices from `[0, length)` without replacement.
    pub fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }

    /// Produces a uniform random permutation of the nodes in `[low, bound)`.
    ///
    /// Used with `low = 1` to generate the depot-free tail of a route.
    pub fn permutation(&mut self, low: usize, bound: usize) -> Vec<usize> {
        let mut nodes: Vec<usize> = (low..bound).collect();
        nodes.shuffle(&mut self.rng);
        nodes
    }

    /// Derives a new generator from this one.
    ///
    /// The coordinator uses this to hand every island an independent stream
    /// while keeping the whole run a pure function of the master seed.
    pub fn derive(&mut self, stream: u64) -> Self {
        let base: u64 = self.rng.gen();
        Self::from_seed(base ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15))
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
