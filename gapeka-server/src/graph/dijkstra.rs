//! Shortest-path search over the rail graph.
//!
//! Plain Dijkstra with haversine edge weights. The frontier minimum is
//! extracted by a linear scan over an id-ordered set; at the expected graph
//! sizes (thousands of nodes) this is fast enough, and any replacement
//! (e.g. a binary heap) conforms as long as it always extracts the true
//! minimum-tentative-distance frontier member.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::trace;

use crate::domain::haversine_m;

use super::network::{NodeId, RailGraph};

/// A memoizing shortest-path finder, scoped to one precomputation run.
///
/// Results are cached by the exact ordered `(start, end)` pair. Edge
/// weights are symmetric, but a cached entry is never reused for the
/// reversed query; the reversed pair gets its own search and its own entry.
pub struct PathFinder<'a> {
    graph: &'a RailGraph,
    cache: HashMap<(NodeId, NodeId), Option<Arc<[NodeId]>>>,
}

impl<'a> PathFinder<'a> {
    pub fn new(graph: &'a RailGraph) -> Self {
        Self {
            graph,
            cache: HashMap::new(),
        }
    }

    /// Find the shortest node path from `start` to `end`.
    ///
    /// Returns `None` when `end` is unreachable from `start`. The trivial
    /// query `find_path(x, x)` returns the single-node path `[x]`.
    pub fn find_path(&mut self, start: NodeId, end: NodeId) -> Option<Arc<[NodeId]>> {
        if let Some(cached) = self.cache.get(&(start, end)) {
            return cached.clone();
        }

        let result: Option<Arc<[NodeId]>> = dijkstra(self.graph, start, end).map(Arc::from);
        trace!(start, end, found = result.is_some(), "shortest path computed");
        self.cache.insert((start, end), result.clone());
        result
    }

    /// Number of memoized (start, end) queries, including failed ones.
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}

fn dijkstra(graph: &RailGraph, start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
    let mut dist: HashMap<NodeId, f64> = HashMap::from([(start, 0.0)]);
    let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
    let mut frontier: BTreeSet<NodeId> = BTreeSet::from([start]);

    while !frontier.is_empty() {
        // Linear min extraction. The frontier iterates in ascending id
        // order and the comparison is strict, so the lowest id wins ties
        // deterministically.
        let mut current = None;
        let mut current_dist = f64::INFINITY;
        for &id in &frontier {
            let d = dist.get(&id).copied().unwrap_or(f64::INFINITY);
            if d < current_dist {
                current_dist = d;
                current = Some(id);
            }
        }
        let current = current?;

        if current == end {
            return Some(reconstruct(&prev, start, end));
        }
        frontier.remove(&current);

        let Some(current_coord) = graph.coord(current) else {
            continue;
        };

        for neighbor in graph.neighbors(current) {
            let Some(neighbor_coord) = graph.coord(neighbor) else {
                continue;
            };
            let tentative = current_dist + haversine_m(current_coord, neighbor_coord);
            if tentative < dist.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                dist.insert(neighbor, tentative);
                prev.insert(neighbor, current);
                frontier.insert(neighbor);
            }
        }
    }

    None
}

/// Walk predecessors back from `end` to `start`.
fn reconstruct(prev: &HashMap<NodeId, NodeId>, start: NodeId, end: NodeId) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match prev.get(&current) {
            Some(&p) => {
                path.push(p);
                current = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
