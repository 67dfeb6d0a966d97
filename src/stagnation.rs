//! # Stagnation Control
//!
//! Each island tracks the best fitness seen so far in the current run and a
//! counter of consecutive generations without strict improvement. When the
//! counter reaches the stagnation limit, the controller orders a regeneration:
//! the island keeps its single best individual, rebuilds the rest of the
//! population from fresh random permutations, and skips that generation's
//! selection, crossover, and mutation.

/// The controller's externally observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagnationState {
    /// The last observed generation strictly improved on the best seen.
    Improving,
    /// At least one generation has passed without strict improvement.
    Stagnant,
}

/// The controller's instruction for the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagnationVerdict {
    /// Proceed with the normal operator pipeline.
    Continue,
    /// Preserve the best individual, regenerate the rest, skip the operators.
    Regenerate,
}

/// Sliding improvement tracker for one island.
#[derive(Debug, Clone)]
pub struct StagnationController {
    limit: usize,
    best_seen: Option<f64>,
    counter: usize,
    state: StagnationState,
}

impl StagnationController {
    /// Creates a controller that fires after `limit` consecutive
    /// non-improving generations.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            best_seen: None,
            counter: 0,
            state: StagnationState::Improving,
        }
    }

    /// Feeds the generation's best fitness and returns the verdict.
    ///
    /// A strictly better value than any seen before resets the counter and
    /// updates the best. Otherwise the counter grows, and reaching the limit
    /// yields `Regenerate` with the counter reset.
    pub fn observe(&mut self, generation_best: f64) -> StagnationVerdict {
        match self.best_seen {
            Some(best) if generation_best <= best => {
                self.counter += 1;
                self.state = StagnationState::Stagnant;
                if self.counter >= self.limit {
                    self.counter = 0;
                    return StagnationVerdict::Regenerate;
                }
                StagnationVerdict::Continue
            }
            _ => {
                self.best_seen = Some(generation_best);
                self.counter = 0;
                self.state = StagnationState::Improving;
                StagnationVerdict::Continue
            }
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> StagnationState {
        self.state
    }

    /// Returns the best fitness observed so far, if any.
    pub fn best_seen(&self) -> Option<f64> {
        self.best_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_improves() {
        let mut controller = StagnationController::new(3);
        assert_eq!(controller.observe(-100.0), StagnationVerdict::Continue);
        assert_eq!(controller.state(), StagnationState::Improving);
        assert_eq!(controller.best_seen(), Some(-100.0));
    }

    #[test]
    fn test_regeneration_fires_exactly_at_limit() {
        let mut controller = StagnationController::new(3);
        controller.observe(-100.0);

        assert_eq!(controller.observe(-100.0), StagnationVerdict::Continue);
        assert_eq!(controller.observe(-110.0), StagnationVerdict::Continue);
        assert_eq!(controller.observe(-105.0), StagnationVerdict::Regenerate);
    }

    #[test]
    fn test_counter_resets_after_regeneration() {
        let mut controller = StagnationController::new(2);
        controller.observe(-100.0);
        controller.observe(-100.0);
        assert_eq!(controller.observe(-100.0), StagnationVerdict::Regenerate);

        // A fresh streak is needed before the next regeneration.
        assert_eq!(controller.observe(-100.0), StagnationVerdict::Continue);
        assert_eq!(controller.observe(-100.0), StagnationVerdict::Regenerate);
    }

    #[test]
    fn test_strict_improvement_resets_counter() {
        let mut controller = StagnationController::new(3);
        controller.observe(-100.0);
        controller.observe(-100.0);
        controller.observe(-100.0);
        assert_eq!(controller.state(), StagnationState::Stagnant);

        assert_eq!(controller.observe(-90.0), StagnationVerdict::Continue);
        assert_eq!(controller.state(), StagnationState::Improving);
        assert_eq!(controller.best_seen(), Some(-90.0));

        // Two more stalls are not enough after the reset.
        assert_eq!(controller.observe(-95.0), StagnationVerdict::Continue);
        assert_eq!(controller.observe(-95.0), StagnationVerdict::Continue);
        assert_eq!(controller.observe(-95.0), StagnationVerdict::Regenerate);
    }

    #[test]
    fn test_equal_fitness_is_not_improvement() {
        let mut controller = StagnationController::new(1);
        controller.observe(-50.0);
        assert_eq!(controller.observe(-50.0), StagnationVerdict::Regenerate);
    }

    #[test]
    fn test_best_seen_survives_regeneration() {
        let mut controller = StagnationController::new(1);
        controller.observe(-50.0);
        controller.observe(-60.0);
        assert_eq!(controller.best_seen(), Some(-50.0));
    }
}
