//! # Swap Mutation
//!
//! With probability `mutation_rate`, a route has two randomly chosen positions
//! swapped. The depot slot never participates: position 0 is fixed by the tour
//! invariant, so both swap positions are drawn from the tail.

use crate::error::{GaError, Result};
use crate::rng::RandomNumberGenerator;
use crate::route::Route;

/// Probabilistic two-position swap over the non-depot tail of a route.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct SwapMutation {
    mutation_rate: f64,
}

impl SwapMutation {
    /// Creates a swap mutator.
    ///
    /// # Errors
    ///
    /// Returns `GaError::Configuration` if `mutation_rate` is outside `[0, 1]`.
    pub fn new(mutation_rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(GaError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                mutation_rate
            )));
        }
        Ok(Self { mutation_rate })
    }

    /// Mutates the route in place with probability `mutation_rate`.
    ///
    /// Routes with fewer than three nodes have no two distinct non-depot
    /// positions to swap and are left untouched.
    pub fn mutate(&self, route: &mut Route, rng: &mut RandomNumberGenerator) {
        if route.len() < 3 {
            return;
        }
        if rng.gen_f64() < self.mutation_rate {
            let (i, j) = rng.distinct_pair(1, route.len());
            route.swap(i, j);
        }
    }
}
