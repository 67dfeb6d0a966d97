//! # GaConfig
//!
//! The `GaConfig` struct holds every recognized knob of the distributed run:
//! population size, operator parameters, generation budget, segment length,
//! island count, the intra-island parallelism threshold, the uniqueness-repair
//! attempt budget, and an optional master seed.
//!
//! ## Example
//!
//! ```rust
//! use archipelago::config::GaConfig;
//!
//! let config = GaConfig::builder()
//!     .population_size(200)
//!     .num_islands(4)
//!     .num_generations(100)
//!     .generations_per_segment(25)
//!     .seed(42)
//!     .build();
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{GaError, Result};

/// Configuration for a distributed evolutionary run.
///
/// Defaults mirror the original deployment values: a population of 10000, four
/// tournaments of three per generation, a 10% mutation rate, 200 generations
/// split into segments of 50, and four islands.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Target number of unique routes per island population.
    pub population_size: usize,
    /// Tournaments run per generation; consecutive winners are paired for crossover.
    pub num_tournaments: usize,
    /// Members competing in each tournament.
    pub tournament_size: usize,
    /// Probability that an offspring undergoes a swap mutation.
    pub mutation_rate: f64,
    /// Total generation budget per island across all segments.
    pub num_generations: usize,
    /// Consecutive non-improving generations before regeneration fires.
    pub stagnation_limit: usize,
    /// Generations between synchronization barriers (the migration interval).
    pub generations_per_segment: usize,
    /// Number of independently evolving islands.
    pub num_islands: usize,
    /// Minimum batch size before fitness evaluation fans out to the worker pool.
    pub parallel_threshold: usize,
    /// Attempt budget for the uniqueness generation/repair loops.
    pub max_uniqueness_attempts: usize,
    /// Master seed; islands derive their own streams from it. Entropy when absent.
    pub seed: Option<u64>,
}

impl GaConfig {
    /// Returns a builder with the default values.
    pub fn builder() -> GaConfigBuilder {
        GaConfigBuilder::default()
    }

    /// Validates the option set on its own, without matrix knowledge.
    ///
    /// The coordinator additionally checks `population_size` against the
    /// number of distinct tours the node count permits.
    ///
    /// # Errors
    ///
    /// Returns `GaError::Configuration` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(GaError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.num_tournaments < 2 {
            return Err(GaError::Configuration(
                "At least 2 tournaments are required to form a crossover pair".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(GaError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.tournament_size > self.population_size {
            return Err(GaError::Configuration(format!(
                "Tournament size ({}) cannot exceed population size ({})",
                self.tournament_size, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.num_generations == 0 {
            return Err(GaError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }
        if self.generations_per_segment == 0 {
            return Err(GaError::Configuration(
                "Generations per segment cannot be zero".to_string(),
            ));
        }
        if self.stagnation_limit == 0 {
            return Err(GaError::Configuration(
                "Stagnation limit must be at least 1".to_string(),
            ));
        }
        if self.num_islands == 0 {
            return Err(GaError::Configuration(
                "At least one island is required".to_string(),
            ));
        }
        if self.max_uniqueness_attempts < self.population_size {
            return Err(GaError::Configuration(format!(
                "Uniqueness attempt budget ({}) is below the population size ({})",
                self.max_uniqueness_attempts, self.population_size
            )));
        }
        Ok(())
    }
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            num_tournaments: 4,
            tournament_size: 3,
            mutation_rate: 0.1,
            num_generations: 200,
            stagnation_limit: 5,
            generations_per_segment: 50,
            num_islands: 4,
            parallel_threshold: 1000,
            max_uniqueness_attempts: 1_000_000,
            seed: None,
        }
    }
}

/// Builder for `GaConfig`.
///
/// Provides a fluent interface; every unset field falls back to the default.
#[derive(Debug, Clone, Default)]
pub struct GaConfigBuilder {
    population_size: Option<usize>,
    num_tournaments: Option<usize>,
    tournament_size: Option<usize>,
    mutation_rate: Option<f64>,
    num_generations: Option<usize>,
    stagnation_limit: Option<usize>,
    generations_per_segment: Option<usize>,
    num_islands: Option<usize>,
    parallel_threshold: Option<usize>,
    max_uniqueness_attempts: Option<usize>,
    seed: Option<u64>,
}

impl GaConfigBuilder {
    /// Sets the target population size per island.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the number of tournaments per generation.
    pub fn num_tournaments(mut self, value: usize) -> Self {
        self.num_tournaments = Some(value);
        self
    }

    /// Sets the number of members in each tournament.
    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    /// Sets the offspring mutation probability.
    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    /// Sets the total generation budget.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    /// Sets the stagnation limit.
    pub fn stagnation_limit(mut self, value: usize) -> Self {
        self.stagnation_limit = Some(value);
        self
    }

    /// Sets the migration interval between barriers.
    pub fn generations_per_segment(mut self, value: usize) -> Self {
        self.generations_per_segment = Some(value);
        self
    }

    /// Sets the island count.
    pub fn num_islands(mut self, value: usize) -> Self {
        self.num_islands = Some(value);
        self
    }

    /// Sets the parallel evaluation threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Sets the uniqueness-repair attempt budget.
    pub fn max_uniqueness_attempts(mut self, value: usize) -> Self {
        self.max_uniqueness_attempts = Some(value);
        self
    }

    /// Sets the master seed.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds the `GaConfig` instance.
    pub fn build(self) -> GaConfig {
        let default = GaConfig::default();
        GaConfig {
            population_size: self.population_size.unwrap_or(default.population_size),
            num_tournaments: self.num_tournaments.unwrap_or(default.num_tournaments),
            tournament_size: self.tournament_size.unwrap_or(default.tournament_size),
            mutation_rate: self.mutation_rate.unwrap_or(default.mutation_rate),
            num_generations: self.num_generations.unwrap_or(default.num_generations),
            stagnation_limit: self.stagnation_limit.unwrap_or(default.stagnation_limit),
            generations_per_segment: self
                .generations_per_segment
                .unwrap_or(default.generations_per_segment),
            num_islands: self.num_islands.unwrap_or(default.num_islands),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(default.parallel_threshold),
            max_uniqueness_attempts: self
                .max_uniqueness_attempts
                .unwrap_or(default.max_uniqueness_attempts),
            seed: self.seed,
        }
    }
}
