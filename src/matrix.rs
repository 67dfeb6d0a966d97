//! # DistanceMatrix
//!
//! An immutable square cost table. Entry `(i, j)` is the travel cost from node
//! `i` to node `j`; a reserved sentinel value marks a forbidden edge. The
//! matrix is read-only after construction and is the only piece of state
//! shared between islands, so it needs no locking.
//!
//! Loading the table from persisted data is an external collaborator's
//! responsibility; the matrix is handed to the optimizer fully built.
//!
//! ## Example
//!
//! ```rust
//! use archipelago::matrix::DistanceMatrix;
//!
//! let matrix = DistanceMatrix::new(vec![
//!     vec![0.0, 1.0, 2.0],
//!     vec![1.0, 0.0, 1.0],
//!     vec![2.0, 1.0, 0.0],
//! ]).unwrap();
//!
//! assert_eq!(matrix.cost(0, 2), 2.0);
//! assert!(!matrix.is_forbidden(0, 2));
//! ```

use crate::error::{GaError, Result};

/// The sentinel cost value that marks a forbidden edge.
pub const FORBIDDEN_EDGE: f64 = 10_000.0;

/// An immutable `num_nodes x num_nodes` travel cost table.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    costs: Vec<f64>,
    num_nodes: usize,
    sentinel: f64,
}

impl DistanceMatrix {
    /// Creates a matrix from nested rows, using the default forbidden-edge sentinel.
    ///
    /// # Errors
    ///
    /// Returns `GaError::Configuration` if the table is empty, not square, or
    /// contains non-finite entries.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let num_nodes = rows.len();
        if num_nodes == 0 {
            return Err(GaError::Configuration(
                "Distance matrix cannot be empty".to_string(),
            ));
        }

        let mut costs = Vec::with_capacity(num_nodes * num_nodes);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != num_nodes {
                return Err(GaError::Configuration(format!(
                    "Distance matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    num_nodes
                )));
            }
            costs.extend(row);
        }

        Self::from_flat(num_nodes, costs)
    }

    /// Creates a matrix from a pre-flattened row-major cost table.
    ///
    /// # Errors
    ///
    /// Returns `GaError::Configuration` if `costs` does not hold exactly
    /// `num_nodes * num_nodes` finite values.
    pub fn from_flat(num_nodes: usize, costs: Vec<f64>) -> Result<Self> {
        if num_nodes == 0 {
            return Err(GaError::Configuration(
                "Distance matrix cannot be empty".to_string(),
            ));
        }
        if costs.len() != num_nodes * num_nodes {
            return Err(GaError::Configuration(format!(
                "Distance matrix shape mismatch: {} entries for {} nodes",
                costs.len(),
                num_nodes
            )));
        }
        if let Some(bad) = costs.iter().find(|c| !c.is_finite()) {
            return Err(GaError::Configuration(format!(
                "Distance matrix contains a non-finite cost: {}",
                bad
            )));
        }

        Ok(Self {
            costs,
            num_nodes,
            sentinel: FORBIDDEN_EDGE,
        })
    }

    /// Replaces the forbidden-edge sentinel value.
    pub fn with_sentinel(mut self, sentinel: f64) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Returns the number of nodes in the table.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the travel cost from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds. Route validity is checked by
    /// the fitness evaluator before any lookup happens.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from * self.num_nodes + to]
    }

    /// Returns true when the edge `(from, to)` carries the forbidden sentinel.
    pub fn is_forbidden(&self, from: usize, to: usize) -> bool {
        self.cost(from, to) == self.sentinel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(DistanceMatrix::new(vec![]).is_err());
    }

    #[test]
    fn test_new_rejects_non_square() {
        let result = DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0]]);
        assert!(matches!(result, Err(GaError::Configuration(_))));
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let result = DistanceMatrix::new(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]);
        assert!(matches!(result, Err(GaError::Configuration(_))));
    }

    #[test]
    fn test_from_flat_shape_mismatch() {
        let result = DistanceMatrix::from_flat(3, vec![0.0; 8]);
        assert!(matches!(result, Err(GaError::Configuration(_))));
    }

    #[test]
    fn test_cost_lookup() {
        let matrix = DistanceMatrix::new(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ])
        .unwrap();

        assert_eq!(matrix.num_nodes(), 3);
        assert_eq!(matrix.cost(1, 2), 1.0);
        assert_eq!(matrix.cost(2, 0), 2.0);
    }

    #[test]
    fn test_forbidden_edge_detection() {
        let matrix = DistanceMatrix::new(vec![
            vec![0.0, FORBIDDEN_EDGE],
            vec![1.0, 0.0],
        ])
        .unwrap();

        assert!(matrix.is_forbidden(0, 1));
        assert!(!matrix.is_forbidden(1, 0));
    }

    #[test]
    fn test_custom_sentinel() {
        let matrix = DistanceMatrix::new(vec![vec![0.0, 99.0], vec![1.0, 0.0]])
            .unwrap()
            .with_sentinel(99.0);

        assert!(matrix.is_forbidden(0, 1));
    }
}
