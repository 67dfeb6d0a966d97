//! # Coordinator
//!
//! Orchestrates the islands through a strict state machine:
//!
//! 1. `Distributing` — generate the initial unique population once and
//!    broadcast a copy to every island.
//! 2. `RunningSegment` — every island evolves independently for a segment of
//!    generations; no cross-island coordination, no shared mutable state.
//! 3. `Synchronizing` — the barrier: gather every island's best, pick the
//!    global best, and broadcast it as the elite for the next segment. The
//!    pinned policy is elite injection: each island keeps its own population
//!    and replaces only its worst member with the global best.
//! 4. `Done` — the generation budget is spent; report the final global best
//!    route and its total tour distance.
//!
//! Transitions are strictly sequential and synchronous: no island starts a new
//! segment before the barrier completes, and the barrier cannot complete
//! before every island has reported.
//!
//! ## Example
//!
//! ```rust
//! use archipelago::config::GaConfig;
//! use archipelago::coordinator::Coordinator;
//! use archipelago::matrix::DistanceMatrix;
//!
//! let matrix = DistanceMatrix::new(vec![
//!     vec![0.0, 1.0, 2.0, 3.0],
//!     vec![1.0, 0.0, 1.0, 2.0],
//!     vec![2.0, 1.0, 0.0, 1.0],
//!     vec![3.0, 2.0, 1.0, 0.0],
//! ]).unwrap();
//!
//! let config = GaConfig::builder()
//!     .population_size(6)
//!     .num_islands(2)
//!     .num_generations(10)
//!     .generations_per_segment(5)
//!     .seed(42)
//!     .build();
//!
//! let mut coordinator = Coordinator::new(config, matrix).unwrap();
//! let best = coordinator.run().unwrap();
//! assert!(best.total_distance() >= 0.0);
//! ```

use std::sync::Arc;
use std::thread;

use tracing::info;

use crate::config::GaConfig;
use crate::error::{GaError, Result};
use crate::island::{IslandReport, IslandWorker};
use crate::matrix::DistanceMatrix;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::route::Route;
use crate::sync::{Collective, IslandEndpoint, SegmentCommand};

/// The coordinator's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Building and broadcasting the initial population.
    Distributing,
    /// Islands are evolving independently.
    RunningSegment,
    /// The barrier: gathering reports and picking the global best.
    Synchronizing,
    /// The generation budget is spent.
    Done,
}

/// The best candidate found across all islands.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalBest {
    /// The best route, depot-first.
    pub route: Route,
    /// Fitness of the route (negative total tour cost).
    pub fitness: f64,
}

impl GlobalBest {
    /// Total tour distance, including the closing edge back to the depot.
    pub fn total_distance(&self) -> f64 {
        -self.fitness
    }
}

/// Selects the highest-fitness report from a barrier gather.
///
/// # Errors
///
/// Returns `GaError::EmptyPopulation` when no reports were gathered.
pub fn best_of_reports(reports: &[IslandReport]) -> Result<&IslandReport> {
    reports
        .iter()
        .max_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .ok_or(GaError::EmptyPopulation)
}

/// Orchestrates N islands over a fixed generation budget.
#[derive(Debug)]
pub struct Coordinator {
    config: GaConfig,
    matrix: Arc<DistanceMatrix>,
    state: CoordinatorState,
}

impl Coordinator {
    /// Creates a coordinator over a validated configuration and matrix.
    ///
    /// # Errors
    ///
    /// Returns `GaError::Configuration` for an invalid option set, a matrix
    /// with fewer than two nodes, or a population size exceeding the number of
    /// distinct depot-prefixed tours, `(num_nodes - 1)!`.
    pub fn new(config: GaConfig, matrix: DistanceMatrix) -> Result<Self> {
        config.validate()?;

        if matrix.num_nodes() < 2 {
            return Err(GaError::Configuration(
                "Distance matrix must cover at least 2 nodes".to_string(),
            ));
        }
        let distinct_tours = max_unique_tours(matrix.num_nodes());
        if config.population_size > distinct_tours {
            return Err(GaError::Configuration(format!(
                "Population size {} exceeds the {} distinct tours over {} nodes",
                config.population_size,
                distinct_tours,
                matrix.num_nodes()
            )));
        }

        Ok(Self {
            config,
            matrix: Arc::new(matrix),
            state: CoordinatorState::Distributing,
        })
    }

    /// Returns the coordinator's current phase.
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Runs the full distributed evolution and returns the global best.
    ///
    /// Blocks until the generation budget is exhausted or a fatal error
    /// aborts the run. On abort no partial result is returned.
    ///
    /// # Errors
    ///
    /// Propagates island-side failures (`UniquenessExhausted`, crashed
    /// workers as `IslandFailure`) and aborts the run.
    pub fn run(&mut self) -> Result<GlobalBest> {
        let num_nodes = self.matrix.num_nodes();
        let mut master_rng = match self.config.seed {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        self.state = CoordinatorState::Distributing;
        info!(
            islands = self.config.num_islands,
            population_size = self.config.population_size,
            generations = self.config.num_generations,
            "distributing initial population"
        );
        let initial = Population::generate_unique(
            self.config.population_size,
            num_nodes,
            &mut master_rng,
            self.config.max_uniqueness_attempts,
        )?;

        let (collective, endpoints) = Collective::new(self.config.num_islands);

        let global = thread::scope(|scope| -> Result<GlobalBest> {
            for (id, endpoint) in endpoints.into_iter().enumerate() {
                let island_rng = master_rng.derive(id as u64);
                let population = initial.clone();
                let config = self.config.clone();
                let matrix = Arc::clone(&self.matrix);
                scope.spawn(move || {
                    island_loop(id, endpoint, population, config, island_rng, matrix)
                });
            }

            let mut global: Option<GlobalBest> = None;
            let mut elite: Option<Route> = None;
            let mut remaining = self.config.num_generations;
            let mut segment = 0;

            while remaining > 0 {
                let generations = remaining.min(self.config.generations_per_segment);

                self.state = CoordinatorState::RunningSegment;
                collective.broadcast(&SegmentCommand {
                    segment,
                    generations,
                    elite: elite.clone(),
                })?;

                self.state = CoordinatorState::Synchronizing;
                let reports = collective.gather()?;
                let best = best_of_reports(&reports)?;
                info!(
                    segment,
                    island = best.island,
                    best_distance = -best.fitness,
                    "synchronization barrier complete"
                );

                if global.as_ref().map_or(true, |g| best.fitness > g.fitness) {
                    global = Some(GlobalBest {
                        route: best.route.clone(),
                        fitness: best.fitness,
                    });
                }
                elite = Some(best.route.clone());

                remaining -= generations;
                segment += 1;
            }

            drop(collective);
            global.ok_or_else(|| {
                GaError::Other("Run completed without gathering any report".to_string())
            })
        })?;

        self.state = CoordinatorState::Done;
        info!(
            best_distance = global.total_distance(),
            "evolution complete"
        );
        Ok(global)
    }
}

/// Counts the distinct depot-prefixed tours over `num_nodes` nodes,
/// `(num_nodes - 1)!`, saturating at `usize::MAX`.
fn max_unique_tours(num_nodes: usize) -> usize {
    let mut total: usize = 1;
    for k in 2..num_nodes {
        total = total.saturating_mul(k);
    }
    total
}

/// The long-lived per-island thread body: receive a segment command, adopt the
/// elite if one was broadcast, evolve, report, repeat until shutdown.
fn island_loop(
    id: usize,
    endpoint: IslandEndpoint,
    population: Population,
    config: GaConfig,
    rng: RandomNumberGenerator,
    matrix: Arc<DistanceMatrix>,
) {
    let mut worker = match IslandWorker::new(id, population, &config, rng) {
        Ok(worker) => worker,
        Err(e) => {
            endpoint.submit(Err(e));
            return;
        }
    };

    while let Some(command) = endpoint.next_command() {
        if let Some(elite) = command.elite {
            worker.adopt_elite(elite, &matrix);
        }
        let report = worker.run_segment(command.generations, &matrix);
        let failed = report.is_err();
        if !endpoint.submit(report) || failed {
            break;
        }
    }
}
