//! # Fitness Evaluation
//!
//! Fitness is the negative of total tour cost, so a higher score always means
//! a shorter tour. Scoring never fails: a malformed route (wrong length,
//! duplicate or missing node) or a route that traverses a forbidden edge is
//! silently assigned the fixed [`INFEASIBLE_PENALTY`] instead of a computed
//! sum. No error ever propagates out of evaluation.
//!
//! Scoring is a pure function of `(route, matrix)`, which is what lets the
//! evaluator split a batch into population-slice chunks and fan them out to
//! the rayon worker pool with no coordination. Chunk results are recombined in
//! input order, so chunked and sequential evaluation return identical scores.
//!
//! ## Example
//!
//! ```rust
//! use archipelago::fitness::{score_route, INFEASIBLE_PENALTY};
//! use archipelago::matrix::DistanceMatrix;
//! use archipelago::route::Route;
//!
//! let matrix = DistanceMatrix::new(vec![
//!     vec![0.0, 1.0, 2.0, 3.0],
//!     vec![1.0, 0.0, 1.0, 2.0],
//!     vec![2.0, 1.0, 0.0, 1.0],
//!     vec![3.0, 2.0, 1.0, 0.0],
//! ]).unwrap();
//!
//! let route = Route::from_nodes(vec![0, 1, 2, 3]);
//! assert_eq!(score_route(&route, &matrix), -6.0);
//! ```

use rayon::prelude::*;

use crate::matrix::DistanceMatrix;
use crate::route::Route;

/// The fixed fitness assigned to malformed or infeasible routes.
///
/// Strictly less than any feasible tour's fitness as long as no feasible tour
/// costs `1e6` or more.
pub const INFEASIBLE_PENALTY: f64 = -1e6;

/// Checks the scoring-side route invariant: correct length and each node in
/// `0..num_nodes` present exactly once.
fn is_well_formed(route: &Route, num_nodes: usize) -> bool {
    if route.len() != num_nodes {
        return false;
    }
    let mut seen = vec![false; num_nodes];
    for &node in route.nodes() {
        if node >= num_nodes || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    true
}

/// Scores one route against the matrix.
///
/// Sums the cost of each consecutive edge plus the closing edge from the last
/// node back to the start, negated. Returns [`INFEASIBLE_PENALTY`] for
/// malformed routes and for any forbidden edge traversal.
pub fn score_route(route: &Route, matrix: &DistanceMatrix) -> f64 {
    let num_nodes = matrix.num_nodes();
    if !is_well_formed(route, num_nodes) {
        return INFEASIBLE_PENALTY;
    }

    let nodes = route.nodes();
    let mut total = 0.0;
    for window in nodes.windows(2) {
        if matrix.is_forbidden(window[0], window[1]) {
            return INFEASIBLE_PENALTY;
        }
        total += matrix.cost(window[0], window[1]);
    }

    let last = nodes[num_nodes - 1];
    let first = nodes[0];
    if matrix.is_forbidden(last, first) {
        return INFEASIBLE_PENALTY;
    }
    total += matrix.cost(last, first);

    -total
}

/// Batch fitness evaluator with a threshold-gated rayon fan-out.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    parallel_threshold: usize,
}

impl FitnessEvaluator {
    /// Creates an evaluator that switches to parallel evaluation once a batch
    /// reaches `parallel_threshold` routes.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Scores a batch of routes, one score per route, in input order.
    ///
    /// Batches at or above the parallel threshold are split into
    /// population-slice chunks and evaluated on the rayon pool; smaller
    /// batches are evaluated sequentially. Either path yields identical
    /// scores for identical inputs.
    pub fn evaluate_batch(&self, routes: &[Route], matrix: &DistanceMatrix) -> Vec<f64> {
        if routes.len() >= self.parallel_threshold.max(1) {
            let chunk_size = Self::chunk_size(routes.len());
            routes
                .par_chunks(chunk_size)
                .flat_map_iter(|chunk| chunk.iter().map(|route| score_route(route, matrix)))
                .collect()
        } else {
            routes
                .iter()
                .map(|route| score_route(route, matrix))
                .collect()
        }
    }

    /// Chunk size for the worker-pool fan-out: roughly two chunks per worker
    /// to smooth out uneven chunk runtimes.
    fn chunk_size(batch_len: usize) -> usize {
        let workers = rayon::current_num_threads().max(1);
        (batch_len / (workers * 2)).max(1)
    }
}

impl Default for FitnessEvaluator {
    fn default() -> Self {
        Self::new(1000)
    }
}
