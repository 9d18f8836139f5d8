//! Rail network graph built from raw way/node geometry.
//!
//! The input is Overpass-style: a flat list of elements tagged "node"
//! (id + coordinate) or "way" (ordered node-id list, optionally with inline
//! per-node geometry). Each way contributes undirected edges between every
//! pair of consecutive nodes.
//!
//! Storage is BTreeMap/BTreeSet keyed by node id so iteration order, and
//! therefore tie-breaking, is deterministic across runs.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use tracing::info;

use crate::domain::{Coord, haversine_m};

/// A rail graph node identifier (OSM node id).
pub type NodeId = i64;

/// A raw geometry element, as found in the rail data file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RailElement {
    Node {
        id: NodeId,
        #[serde(default)]
        lat: Option<f64>,
        #[serde(default)]
        lon: Option<f64>,
    },
    Way {
        #[serde(default)]
        nodes: Vec<NodeId>,
        /// Inline per-node coordinates (Overpass `out geom`), parallel to
        /// `nodes`.
        #[serde(default)]
        geometry: Option<Vec<Coord>>,
    },
}

/// An immutable rail network: node coordinates plus undirected adjacency.
#[derive(Debug, Default)]
pub struct RailGraph {
    coords: BTreeMap<NodeId, Coord>,
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl RailGraph {
    /// Build a graph from raw elements.
    ///
    /// Nodes without coordinates and ways with fewer than two nodes are
    /// skipped silently: this is sparse input, not an error. An edge is
    /// only created when both endpoints have known coordinates, so every
    /// edge has a well-defined haversine weight.
    pub fn build(elements: &[RailElement]) -> Self {
        let mut coords: BTreeMap<NodeId, Coord> = BTreeMap::new();

        // First pass: collect coordinates, from node elements and from
        // inline way geometry.
        for element in elements {
            match element {
                RailElement::Node {
                    id,
                    lat: Some(lat),
                    lon: Some(lon),
                } => {
                    coords.insert(*id, Coord::new(*lat, *lon));
                }
                RailElement::Node { .. } => {}
                RailElement::Way {
                    nodes,
                    geometry: Some(geometry),
                } => {
                    for (id, coord) in nodes.iter().zip(geometry) {
                        coords.entry(*id).or_insert(*coord);
                    }
                }
                RailElement::Way { .. } => {}
            }
        }

        // Second pass: link consecutive way nodes, both directions.
        let mut adjacency: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        for element in elements {
            let RailElement::Way { nodes, .. } = element else {
                continue;
            };
            if nodes.len() < 2 {
                continue;
            }
            for pair in nodes.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if !coords.contains_key(&a) || !coords.contains_key(&b) {
                    continue;
                }
                adjacency.entry(a).or_default().insert(b);
                adjacency.entry(b).or_default().insert(a);
            }
        }

        let graph = Self { coords, adjacency };
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "rail graph built"
        );
        graph
    }

    /// Coordinate of a node, if known.
    pub fn coord(&self, id: NodeId) -> Option<Coord> {
        self.coords.get(&id).copied()
    }

    /// Neighbors of a node, in ascending id order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    /// Number of nodes with known coordinates.
    pub fn node_count(&self) -> usize {
        self.coords.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Snap a coordinate to the nearest graph node within `threshold_m`.
    ///
    /// Scans every node in ascending id order with a strict-minimum test,
    /// so on an exact distance tie the lowest id wins; results are
    /// reproducible across runs. Returns `None` when the nearest node is at
    /// or beyond the threshold, meaning the location is not reachable from
    /// the rail graph.
    pub fn nearest_node(&self, target: Coord, threshold_m: f64) -> Option<NodeId> {
        let mut closest: Option<NodeId> = None;
        let mut min_distance = f64::INFINITY;

        for (&id, &coord) in &self.coords {
            let distance = haversine_m(target, coord);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(id);
            }
        }

        if min_distance < threshold_m { closest } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Degrees of latitude spanning roughly the given distance in meters.
    fn lat_degrees(meters: f64) -> f64 {
        meters / (6_371_000.0 * std::f64::consts::PI / 180.0)
    }

    fn node(id: NodeId, lat: f64, lon: f64) -> RailElement {
        RailElement::Node {
            id,
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    fn way(nodes: &[NodeId]) -> RailElement {
        RailElement::Way {
            nodes: nodes.to_vec(),
            geometry: None,
        }
    }

    #[test]
    fn build_links_consecutive_way_nodes() {
        let elements = vec![
            node(1, 0.0, 0.0),
            node(2, 0.0, 0.01),
            node(3, 0.0, 0.02),
            way(&[1, 2, 3]),
        ];
        let graph = RailGraph::build(&elements);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(2).collect::<Vec<_>>(), vec![1, 3]);
        // Undirected
        assert_eq!(graph.neighbors(3).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn build_deduplicates_repeated_edges() {
        let elements = vec![
            node(1, 0.0, 0.0),
            node(2, 0.0, 0.01),
            way(&[1, 2]),
            way(&[2, 1]),
        ];
        let graph = RailGraph::build(&elements);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn build_skips_incomplete_elements() {
        let elements = vec![
            RailElement::Node {
                id: 1,
                lat: Some(0.0),
                lon: None,
            },
            node(2, 0.0, 0.01),
            way(&[2]),      // too short
            way(&[1, 2]),   // endpoint 1 has no coordinate
        ];
        let graph = RailGraph::build(&elements);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn build_uses_inline_way_geometry() {
        let elements = vec![RailElement::Way {
            nodes: vec![10, 11],
            geometry: Some(vec![Coord::new(0.0, 0.0), Coord::new(0.0, 0.01)]),
        }];
        let graph = RailGraph::build(&elements);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.coord(10).is_some());
    }

    #[test]
    fn deserialize_tagged_elements() {
        let raw = r#"[
            {"type": "node", "id": 1, "lat": -6.2, "lon": 106.8},
            {"type": "node", "id": 2},
            {"type": "way", "id": 9, "nodes": [1, 2]}
        ]"#;
        let elements: Vec<RailElement> = serde_json::from_str(raw).unwrap();
        assert_eq!(elements.len(), 3);

        let graph = RailGraph::build(&elements);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn nearest_node_within_threshold() {
        // One node 500 m north of the target
        let elements = vec![node(1, lat_degrees(500.0), 106.8)];
        let graph = RailGraph::build(&elements);

        let target = Coord::new(0.0, 106.8);
        assert_eq!(graph.nearest_node(target, 2000.0), Some(1));
    }

    #[test]
    fn nearest_node_beyond_threshold() {
        // Nearest node is 2500 m away, over the 2000 m threshold
        let elements = vec![node(1, lat_degrees(2500.0), 106.8)];
        let graph = RailGraph::build(&elements);

        let target = Coord::new(0.0, 106.8);
        assert_eq!(graph.nearest_node(target, 2000.0), None);
    }

    #[test]
    fn nearest_node_picks_minimum() {
        let elements = vec![
            node(1, lat_degrees(900.0), 106.8),
            node(2, lat_degrees(300.0), 106.8),
            node(3, lat_degrees(600.0), 106.8),
        ];
        let graph = RailGraph::build(&elements);

        let target = Coord::new(0.0, 106.8);
        assert_eq!(graph.nearest_node(target, 2000.0), Some(2));
    }

    #[test]
    fn nearest_node_tie_breaks_lowest_id() {
        // Two nodes at the identical coordinate
        let elements = vec![
            node(7, lat_degrees(100.0), 106.8),
            node(3, lat_degrees(100.0), 106.8),
        ];
        let graph = RailGraph::build(&elements);

        let target = Coord::new(0.0, 106.8);
        assert_eq!(graph.nearest_node(target, 2000.0), Some(3));
    }

    #[test]
    fn nearest_node_empty_graph() {
        let graph = RailGraph::build(&[]);
        assert_eq!(graph.nearest_node(Coord::new(0.0, 0.0), 2000.0), None);
    }
}
