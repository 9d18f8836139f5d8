//! Offline route precomputation.
//!
//! A [`PrecomputeSession`] owns everything scoped to one run: the
//! shortest-path memo and a station-snap memo, both over a shared immutable
//! graph. For each train it resolves every consecutive stop pair to a rail
//! sub-path and stitches the pieces into one polyline. Any failure —
//! unknown station code, no node within snapping range, no rail path — is
//! logged and skips only that segment; the rest of the train's route and
//! all other trains are unaffected.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::PrecomputeConfig;
use crate::data::StationIndex;
use crate::domain::{StationCode, TrainSchedule};
use crate::graph::{NodeId, PathFinder, RailGraph};
use crate::store::{RoutePoint, RouteStore};

/// State owned by one precomputation run.
pub struct PrecomputeSession<'a> {
    graph: &'a RailGraph,
    stations: &'a StationIndex,
    config: &'a PrecomputeConfig,
    finder: PathFinder<'a>,
    snap_memo: HashMap<StationCode, Option<NodeId>>,
}

impl<'a> PrecomputeSession<'a> {
    pub fn new(
        graph: &'a RailGraph,
        stations: &'a StationIndex,
        config: &'a PrecomputeConfig,
    ) -> Self {
        Self {
            graph,
            stations,
            config,
            finder: PathFinder::new(graph),
            snap_memo: HashMap::new(),
        }
    }

    /// Stitch routes for every schedule, omitting trains that end up with
    /// no usable segments.
    pub fn stitch_all(&mut self, schedules: &[TrainSchedule]) -> RouteStore {
        let mut store = RouteStore::new();
        for schedule in schedules {
            if let Some(points) = self.stitch_route(schedule) {
                store.insert(schedule.id.clone(), points);
            }
        }
        info!(
            trains = schedules.len(),
            routes = store.len(),
            path_queries = self.finder.cached_queries(),
            "route stitching complete"
        );
        store
    }

    /// Stitch one train's polyline from its consecutive stop pairs.
    ///
    /// The first point of every segment after the first is dropped, so the
    /// junction point shared by two adjacent segments appears once.
    /// Returns `None` when no segment yields any points.
    pub fn stitch_route(&mut self, schedule: &TrainSchedule) -> Option<Vec<RoutePoint>> {
        if schedule.stops.len() < 2 {
            return None;
        }

        let mut full_path: Vec<RoutePoint> = Vec::new();
        for pair in schedule.stops.windows(2) {
            let Some(segment) = self.segment_path(schedule, &pair[0].station, &pair[1].station)
            else {
                continue;
            };
            let skip = if full_path.is_empty() { 0 } else { 1 };
            full_path.extend(segment.into_iter().skip(skip));
        }

        if full_path.is_empty() {
            None
        } else {
            Some(full_path)
        }
    }

    /// Resolve one stop pair to a coordinate sub-path.
    fn segment_path(
        &mut self,
        schedule: &TrainSchedule,
        from_label: &str,
        to_label: &str,
    ) -> Option<Vec<RoutePoint>> {
        let train = schedule.id.as_str();

        let from = self.resolve_station(train, from_label)?;
        let to = self.resolve_station(train, to_label)?;

        let Some(path) = self.finder.find_path(from, to) else {
            warn!(train, from_label, to_label, "segment skipped: no rail path");
            return None;
        };

        Some(
            path.iter()
                .filter_map(|&id| self.graph.coord(id))
                .map(|c| [c.lat, c.lon])
                .collect(),
        )
    }

    /// Resolve a stop label to its snapped rail node, memoized per code.
    fn resolve_station(&mut self, train: &str, label: &str) -> Option<NodeId> {
        let Some(code) = StationCode::from_label(label) else {
            warn!(train, label, "segment skipped: no station code in label");
            return None;
        };

        if let Some(&memoized) = self.snap_memo.get(&code) {
            return memoized;
        }

        let snapped = match self.stations.get(&code) {
            Some(&coord) => {
                let node = self
                    .graph
                    .nearest_node(coord, self.config.snap_threshold_m);
                if node.is_none() {
                    warn!(train, station = %code, "segment skipped: no rail node within range");
                }
                node
            }
            None => {
                warn!(train, station = %code, "segment skipped: station not in reference data");
                None
            }
        };

        self.snap_memo.insert(code, snapped);
        snapped
    }
}
