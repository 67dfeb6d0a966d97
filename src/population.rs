//! # Population
//!
//! A fixed-target-size container of unique candidate routes. Uniqueness is
//! enforced by value equality on the full node sequence. Generation and repair
//! both draw from a uniform random permutation generator and discard
//! duplicates, bounded by an explicit attempt budget so a degenerate
//! configuration (more routes requested than distinct permutations exist)
//! fails loudly instead of looping forever.
//!
//! ## Example
//!
//! ```rust
//! use archipelago::population::Population;
//! use archipelago::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let population = Population::generate_unique(20, 8, &mut rng, 10_000).unwrap();
//!
//! assert_eq!(population.len(), 20);
//! ```

use std::collections::HashSet;

use crate::error::{GaError, Result};
use crate::rng::RandomNumberGenerator;
use crate::route::Route;

/// A set of unique candidate routes with a fixed target size.
#[derive(Debug, Clone)]
pub struct Population {
    routes: Vec<Route>,
    target_size: usize,
}

impl Population {
    /// Generates exactly `size` distinct depot-prefixed random permutations.
    ///
    /// Draws repeatedly from the uniform permutation generator, discarding
    /// duplicates. Each draw counts against `max_attempts`.
    ///
    /// # Errors
    ///
    /// Returns `GaError::UniquenessExhausted` if the attempt budget is spent
    /// before `size` unique routes exist, and `GaError::Configuration` if
    /// `size` is zero or `num_nodes < 2`.
    pub fn generate_unique(
        size: usize,
        num_nodes: usize,
        rng: &mut RandomNumberGenerator,
        max_attempts: usize,
    ) -> Result<Self> {
        if size == 0 {
            return Err(GaError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if num_nodes < 2 {
            return Err(GaError::Configuration(format!(
                "Cannot build tours over {} node(s); at least 2 are required",
                num_nodes
            )));
        }

        let mut routes = Vec::with_capacity(size);
        let mut seen: HashSet<Route> = HashSet::with_capacity(size);

        for _ in 0..max_attempts {
            if routes.len() == size {
                break;
            }
            let candidate = Route::random(num_nodes, rng);
            if seen.insert(candidate.clone()) {
                routes.push(candidate);
            }
        }

        if routes.len() < size {
            return Err(GaError::UniquenessExhausted {
                produced: routes.len(),
                target: size,
                attempts: max_attempts,
            });
        }

        Ok(Self {
            routes,
            target_size: size,
        })
    }

    /// Wraps an existing set of routes, trusting the caller on uniqueness.
    ///
    /// Used when a segment starts from a broadcast population; `repair` will
    /// restore the invariant if the caller's guarantee does not hold.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        let target_size = routes.len();
        Self {
            routes,
            target_size,
        }
    }

    /// Returns the number of routes currently held.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true when the population holds no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the target size the population maintains at generation boundaries.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Returns the member routes in insertion order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns one member by index.
    pub fn route(&self, index: usize) -> &Route {
        &self.routes[index]
    }

    /// Returns true when an identical route is already a member.
    pub fn contains(&self, route: &Route) -> bool {
        self.routes.iter().any(|r| r == route)
    }

    /// Overwrites one member.
    ///
    /// The caller guarantees the replacement leaves the population unique;
    /// the repair step restores the invariant when it does not.
    pub fn replace(&mut self, index: usize, route: Route) {
        self.routes[index] = route;
    }

    /// Appends a route, growing the target size by one.
    ///
    /// Used by the regeneration path to re-attach the preserved elite after
    /// rebuilding the rest of the population.
    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
        self.target_size = self.target_size.max(self.routes.len());
    }

    /// Deduplicates the population and refills it with fresh random
    /// permutations until the target size is restored.
    ///
    /// Crossover and mutation can produce offspring identical to existing
    /// members; this runs after replacement to guard the size invariant.
    /// The first occurrence of each duplicate survives, so an elite at a low
    /// index is never lost.
    ///
    /// # Errors
    ///
    /// Returns `GaError::UniquenessExhausted` if the attempt budget is spent
    /// before the target size is reached.
    pub fn repair(
        &mut self,
        num_nodes: usize,
        rng: &mut RandomNumberGenerator,
        max_attempts: usize,
    ) -> Result<()> {
        let mut seen: HashSet<Route> = HashSet::with_capacity(self.target_size);
        self.routes.retain(|route| seen.insert(route.clone()));

        for _ in 0..max_attempts {
            if self.routes.len() == self.target_size {
                return Ok(());
            }
            let candidate = Route::random(num_nodes, rng);
            if seen.insert(candidate.clone()) {
                self.routes.push(candidate);
            }
        }

        if self.routes.len() < self.target_size {
            return Err(GaError::UniquenessExhausted {
                produced: self.routes.len(),
                target: self.target_size,
                attempts: max_attempts,
            });
        }
        Ok(())
    }
}
