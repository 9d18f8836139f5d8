//! Live train position estimation for the GAPEKA timetable.
//!
//! Two phases share this library. The `precompute` binary builds a rail
//! graph from raw geometry, snaps stations to it, and stitches a polyline
//! per train via cached shortest-path searches. The server then estimates,
//! for any time of day, which segment of its schedule each train is in and
//! interpolates a position along its precomputed polyline.

pub mod cache;
pub mod config;
pub mod data;
pub mod domain;
pub mod estimator;
pub mod graph;
pub mod precompute;
pub mod store;
pub mod web;
