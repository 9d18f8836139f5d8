//! Request/response DTOs for the web layer.

use serde::{Deserialize, Serialize};

use crate::estimator::TrainPosition;

/// Query parameters for the positions endpoint.
#[derive(Debug, Deserialize)]
pub struct PositionsQuery {
    /// Optional "HH:MM" override for the evaluation time, for
    /// deterministic queries. Defaults to the current time in the
    /// configured timetable timezone.
    pub at: Option<String>,
}

/// A currently active train, as reported to the client.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveTrainDto {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&TrainPosition> for ActiveTrainDto {
    fn from(p: &TrainPosition) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            lat: p.lat,
            lon: p.lon,
        }
    }
}

/// Generic error body. Carries a message only, never internals.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
