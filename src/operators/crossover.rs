//! # Order Crossover (OX)
//!
//! Order crossover works on the depot-stripped tails of two parent routes: a
//! contiguous slice of parent 1 is copied verbatim into the child at the same
//! positions, and the remaining positions are filled left to right with the
//! parent-2 genes absent from that slice, preserving parent 2's relative
//! order. The depot is re-attached as the child's first node, so a valid pair
//! of parents always yields a valid permutation.

use crate::rng::RandomNumberGenerator;
use crate::route::{Route, DEPOT};

/// Crosses two depot-stripped parent tails, returning a full depot-prefixed
/// child route.
///
/// Cut points `start <= end` are drawn uniformly over the tail; the slice
/// `[start, end]` (inclusive) comes from `parent1`.
pub fn order_crossover(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut RandomNumberGenerator,
) -> Route {
    debug_assert_eq!(parent1.len(), parent2.len());
    let size = parent1.len();

    if size < 2 {
        let mut nodes = Vec::with_capacity(size + 1);
        nodes.push(DEPOT);
        nodes.extend_from_slice(parent1);
        return Route::from_nodes(nodes);
    }

    let (start, end) = rng.distinct_pair(0, size);
    order_crossover_at(parent1, parent2, start, end)
}

/// Order crossover with explicit cut points, `start <= end`, both inclusive.
///
/// Split out so the cut-point behavior can be tested deterministically.
pub(crate) fn order_crossover_at(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Route {
    let size = parent1.len();
    let mut tail: Vec<Option<usize>> = vec![None; size];
    for i in start..=end {
        tail[i] = Some(parent1[i]);
    }

    let mut fill = parent2
        .iter()
        .filter(|n| !parent1[start..=end].contains(n))
        .copied();

    let mut nodes = Vec::with_capacity(size + 1);
    nodes.push(DEPOT);
    for slot in tail {
        match slot {
            Some(node) => nodes.push(node),
            // Parents are permutations of the same node set, so the fill
            // iterator yields exactly one gene per empty slot.
            None => nodes.push(fill.next().unwrap_or(DEPOT)),
        }
    }

    Route::from_nodes(nodes)
}
