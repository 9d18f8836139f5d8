//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::PositionCache;
use crate::config::ServerConfig;
use crate::domain::TrainSchedule;
use crate::store::RouteStore;

/// Shared application state.
///
/// The schedules and route store are loaded once at startup and are
/// read-only thereafter; estimation calls never mutate shared state, so
/// concurrent requests never contend.
#[derive(Clone)]
pub struct AppState {
    /// All train schedules from the timetable.
    pub schedules: Arc<Vec<TrainSchedule>>,

    /// Precomputed routes, one polyline per train.
    pub routes: Arc<RouteStore>,

    /// Per-minute cache of computed position lists.
    pub cache: Arc<PositionCache>,

    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        schedules: Vec<TrainSchedule>,
        routes: RouteStore,
        cache: PositionCache,
        config: ServerConfig,
    ) -> Self {
        Self {
            schedules: Arc::new(schedules),
            routes: Arc::new(routes),
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }
}
