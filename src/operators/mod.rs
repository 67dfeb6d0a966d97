//! # Genetic Operators
//!
//! The per-generation operator pipeline: tournament selection produces a
//! selected pool, consecutive winners are paired for order crossover, the
//! offspring are swap-mutated, and the worst-scoring members of the population
//! are replaced one-for-one. Uniqueness repair
//! ([`Population::repair`](crate::population::Population::repair)) runs after
//! replacement to restore the population-size invariant.

pub mod crossover;
pub mod mutation;
pub mod selection;

pub use crossover::order_crossover;
pub use mutation::SwapMutation;
pub use selection::TournamentSelection;

use crate::error::Result;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::route::Route;

/// The full operator pipeline for one generation, configured once per island.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    selection: TournamentSelection,
    mutation: SwapMutation,
}

impl GeneticOperators {
    /// Creates the operator pipeline.
    ///
    /// # Errors
    ///
    /// Returns `GaError::Configuration` for a zero tournament count or size,
    /// or a mutation rate outside `[0, 1]`.
    pub fn new(
        num_tournaments: usize,
        tournament_size: usize,
        mutation_rate: f64,
    ) -> Result<Self> {
        Ok(Self {
            selection: TournamentSelection::new(num_tournaments, tournament_size)?,
            mutation: SwapMutation::new(mutation_rate)?,
        })
    }

    /// Runs tournament selection over the scored population.
    pub fn select(
        &self,
        population: &Population,
        scores: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Route>> {
        self.selection.select(population, scores, rng)
    }

    /// Pairs consecutive selected winners, crosses each pair with order
    /// crossover, and mutates the offspring.
    ///
    /// An odd trailing winner is dropped, matching the pairwise scheme.
    pub fn breed(&self, selected: &[Route], rng: &mut RandomNumberGenerator) -> Vec<Route> {
        let mut offspring = Vec::with_capacity(selected.len() / 2);
        for pair in selected.chunks_exact(2) {
            let mut child =
                order_crossover(&pair[0].nodes()[1..], &pair[1].nodes()[1..], rng);
            self.mutation.mutate(&mut child, rng);
            offspring.push(child);
        }
        offspring
    }

    /// Replaces the worst-scoring members with the offspring, one-for-one.
    ///
    /// Worst members are taken in ascending fitness order. Offspring beyond
    /// the population size are ignored (never happens with the configured
    /// tournament counts, which produce far fewer offspring than members).
    pub fn replace_worst(
        &self,
        population: &mut Population,
        scores: &[f64],
        offspring: Vec<Route>,
    ) {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (child, &idx) in offspring.into_iter().zip(order.iter()) {
            population.replace(idx, child);
        }
    }
}
