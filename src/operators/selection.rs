//! # Tournament Selection
//!
//! Selection samples a fixed-size random subset of the population (without
//! replacement) and keeps the highest-fitness member; one such tournament runs
//! per selection slot. Smaller tournaments explore more, larger tournaments
//! exploit the current best more aggressively.
//!
//! Ties go to the first of the tied maxima in sampling order, which a fixed
//! seed makes reproducible.

use crate::error::{GaError, Result};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::route::Route;

/// Tournament selection over a scored population.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    num_tournaments: usize,
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a tournament selector.
    ///
    /// # Arguments
    ///
    /// * `num_tournaments` - How many winners to produce per generation.
    /// * `tournament_size` - How many members compete in each tournament.
    ///
    /// # Errors
    ///
    /// Returns `GaError::Configuration` if either argument is zero.
    pub fn new(num_tournaments: usize, tournament_size: usize) -> Result<Self> {
        if num_tournaments == 0 {
            return Err(GaError::Configuration(
                "Number of tournaments must be at least 1".to_string(),
            ));
        }
        if tournament_size == 0 {
            return Err(GaError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            num_tournaments,
            tournament_size,
        })
    }

    /// Runs all tournaments and returns the winners in tournament order.
    ///
    /// # Errors
    ///
    /// Returns `GaError::EmptyPopulation` for an empty population and
    /// `GaError::Configuration` when the score vector length does not match
    /// the population.
    pub fn select(
        &self,
        population: &Population,
        scores: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Route>> {
        if population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        if scores.len() != population.len() {
            return Err(GaError::Configuration(format!(
                "Score vector length ({}) doesn't match population length ({})",
                scores.len(),
                population.len()
            )));
        }

        let mut winners = Vec::with_capacity(self.num_tournaments);
        for _ in 0..self.num_tournaments {
            let winner = self.run_tournament(scores, rng);
            winners.push(population.route(winner).clone());
        }
        Ok(winners)
    }

    /// Runs a single tournament and returns the winning index.
    fn run_tournament(&self, scores: &[f64], rng: &mut RandomNumberGenerator) -> usize {
        let participants = rng.sample_distinct(scores.len(), self.tournament_size);

        let mut best_idx = participants[0];
        let mut best_score = scores[best_idx];
        for &idx in &participants[1..] {
            if scores[idx] > best_score {
                best_idx = idx;
                best_score = scores[idx];
            }
        }
        best_idx
    }
}
