//! # Route
//!
//! A candidate tour: an ordered sequence of distinct node identifiers starting
//! at the fixed depot (node `0`), with an implicit closing edge from the last
//! node back to the depot. A valid route is a permutation of
//! `0..num_nodes`; routes that break the invariant are never rejected here but
//! are scored with the infeasibility penalty by the fitness evaluator.
//!
//! Routes compare and hash by their full node sequence, which is what the
//! population uses to enforce uniqueness.

use std::fmt;

use crate::rng::RandomNumberGenerator;

/// The fixed depot node every tour starts from.
pub const DEPOT: usize = 0;

/// An ordered, depot-prefixed candidate tour.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Route {
    nodes: Vec<usize>,
}

impl Route {
    /// Creates a route from an explicit node sequence.
    ///
    /// No validation happens here; malformed sequences are handled by the
    /// fitness penalty policy.
    pub fn from_nodes(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// Generates a uniform random depot-prefixed permutation of `0..num_nodes`.
    pub fn random(num_nodes: usize, rng: &mut RandomNumberGenerator) -> Self {
        let mut nodes = Vec::with_capacity(num_nodes);
        nodes.push(DEPOT);
        nodes.extend(rng.permutation(1, num_nodes));
        Self { nodes }
    }

    /// Returns the node sequence.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Returns the number of nodes in the sequence.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks whether the route is a permutation of `0..num_nodes` starting at
    /// the depot.
    pub fn is_permutation(&self, num_nodes: usize) -> bool {
        if self.nodes.len() != num_nodes {
            return false;
        }
        if self.nodes.first() != Some(&DEPOT) {
            return false;
        }
        let mut seen = vec![false; num_nodes];
        for &node in &self.nodes {
            if node >= num_nodes || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        true
    }

    /// Swaps the nodes at two positions.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.nodes.swap(i, j);
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Route").field(&self.nodes).finish()
    }
}
