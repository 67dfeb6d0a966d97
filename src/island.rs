//! # IslandWorker
//!
//! One island owns one population and evolves it independently for a segment
//! of generations. Each generation: batch fitness evaluation (fanned out
//! across the local worker pool), stagnation check, and — unless a
//! regeneration fired — selection, crossover, mutation, worst-member
//! replacement, and uniqueness repair. At the end of a segment the island
//! reports its single best `(fitness, route)` pair to the coordinator.
//!
//! Nothing here is shared with other islands; the only read-only common input
//! is the distance matrix.

use tracing::{debug, trace};

use crate::config::GaConfig;
use crate::error::{GaError, Result};
use crate::fitness::FitnessEvaluator;
use crate::matrix::DistanceMatrix;
use crate::operators::GeneticOperators;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::route::Route;
use crate::stagnation::{StagnationController, StagnationVerdict};

/// An island's best candidate at the end of a segment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IslandReport {
    /// The reporting island's identifier.
    pub island: usize,
    /// Fitness of the best route (negative total tour cost).
    pub fitness: f64,
    /// The best route itself.
    pub route: Route,
}

/// Runs the local generation loop for one island.
#[derive(Debug)]
pub struct IslandWorker {
    id: usize,
    population: Population,
    operators: GeneticOperators,
    evaluator: FitnessEvaluator,
    stagnation_limit: usize,
    max_uniqueness_attempts: usize,
    rng: RandomNumberGenerator,
}

impl IslandWorker {
    /// Creates a worker owning `population`, configured from `config`, with
    /// its own random stream.
    ///
    /// # Errors
    ///
    /// Returns `GaError::Configuration` if the operator parameters are invalid
    /// or the population is empty.
    pub fn new(
        id: usize,
        population: Population,
        config: &GaConfig,
        rng: RandomNumberGenerator,
    ) -> Result<Self> {
        if population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        Ok(Self {
            id,
            population,
            operators: GeneticOperators::new(
                config.num_tournaments,
                config.tournament_size,
                config.mutation_rate,
            )?,
            evaluator: FitnessEvaluator::new(config.parallel_threshold),
            stagnation_limit: config.stagnation_limit,
            max_uniqueness_attempts: config.max_uniqueness_attempts,
            rng,
        })
    }

    /// Returns the island identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the island's current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Injects the global best from a synchronization barrier.
    ///
    /// The island keeps its own population and replaces only its worst member
    /// with the elite; injection is skipped when an identical route is already
    /// present, so the uniqueness invariant holds afterwards.
    pub fn adopt_elite(&mut self, elite: Route, matrix: &DistanceMatrix) {
        if self.population.contains(&elite) {
            return;
        }
        let scores = self
            .evaluator
            .evaluate_batch(self.population.routes(), matrix);
        if let Some((worst_idx, _)) = argmin(&scores) {
            self.population.replace(worst_idx, elite);
        }
    }

    /// Evolves the population for `generations` generations and reports the
    /// best candidate found.
    ///
    /// Stagnation state is scoped to the segment: a fresh controller starts
    /// each call, matching the island's lifetime between barriers.
    ///
    /// # Errors
    ///
    /// Returns `GaError::UniquenessExhausted` if regeneration or repair runs
    /// out of attempts, or any operator configuration error.
    pub fn run_segment(
        &mut self,
        generations: usize,
        matrix: &DistanceMatrix,
    ) -> Result<IslandReport> {
        let num_nodes = matrix.num_nodes();
        let mut stagnation = StagnationController::new(self.stagnation_limit);

        for generation in 0..generations {
            let scores = self
                .evaluator
                .evaluate_batch(self.population.routes(), matrix);
            let (best_idx, best_score) =
                argmax(&scores).ok_or(GaError::EmptyPopulation)?;
            trace!(
                island = self.id,
                generation,
                best_fitness = best_score,
                "generation evaluated"
            );

            if stagnation.observe(best_score) == StagnationVerdict::Regenerate {
                debug!(
                    island = self.id,
                    generation, "stagnation limit reached; regenerating population"
                );
                self.regenerate(best_idx, num_nodes)?;
                continue;
            }

            let selected = self.operators.select(&self.population, &scores, &mut self.rng)?;
            let offspring = self.operators.breed(&selected, &mut self.rng);
            self.operators
                .replace_worst(&mut self.population, &scores, offspring);
            self.population
                .repair(num_nodes, &mut self.rng, self.max_uniqueness_attempts)?;
        }

        let scores = self
            .evaluator
            .evaluate_batch(self.population.routes(), matrix);
        let (best_idx, best_score) = argmax(&scores).ok_or(GaError::EmptyPopulation)?;

        Ok(IslandReport {
            island: self.id,
            fitness: best_score,
            route: self.population.route(best_idx).clone(),
        })
    }

    /// Replaces every member except the best with fresh unique permutations.
    fn regenerate(&mut self, best_idx: usize, num_nodes: usize) -> Result<()> {
        let elite = self.population.route(best_idx).clone();
        let size = self.population.target_size();

        let mut regenerated = Population::generate_unique(
            size - 1,
            num_nodes,
            &mut self.rng,
            self.max_uniqueness_attempts,
        )?;
        regenerated.push(elite);
        // The elite may collide with one of the fresh draws; repair restores
        // size and uniqueness while an identical copy of the elite survives.
        regenerated.repair(num_nodes, &mut self.rng, self.max_uniqueness_attempts)?;

        self.population = regenerated;
        Ok(())
    }
}

fn argmax(scores: &[f64]) -> Option<(usize, f64)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

fn argmin(scores: &[f64]) -> Option<(usize, f64)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}
