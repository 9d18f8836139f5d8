//! Rail network graph: construction, nearest-node snapping, and
//! shortest-path search.

mod dijkstra;
mod network;

pub use dijkstra::PathFinder;
pub use network::{NodeId, RailElement, RailGraph};
