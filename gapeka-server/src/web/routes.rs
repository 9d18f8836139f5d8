//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Timelike, Utc};
use chrono_tz::Tz;
use tower_http::services::ServeDir;
use tracing::{debug, error};

use crate::domain::TimeOfDay;
use crate::estimator::active_trains;

use super::dto::{ActiveTrainDto, ErrorResponse, PositionsQuery};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/health", get(health))
        .route("/api/positions", get(get_positions))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Report the list of currently active trains with estimated positions.
///
/// Evaluates the timetable at the current minute in the configured
/// timezone, or at the `at=HH:MM` override. Results for a minute are
/// cached and shared between concurrent callers.
async fn get_positions(
    State(state): State<AppState>,
    Query(query): Query<PositionsQuery>,
) -> Result<Json<Vec<ActiveTrainDto>>, AppError> {
    let now = match &query.at {
        Some(raw) => TimeOfDay::parse_hhmm(raw).map_err(|e| AppError::BadRequest {
            message: format!("invalid 'at' parameter {raw:?}: {e}"),
        })?,
        None => current_time_of_day(state.config.timezone)?,
    };

    if let Some(cached) = state.cache.get(now).await {
        return Ok(Json(to_dtos(&cached)));
    }

    let positions = Arc::new(active_trains(&state.schedules, &state.routes, now));
    debug!(at = %now, active = positions.len(), "positions computed");
    state.cache.insert(now, positions.clone()).await;

    Ok(Json(to_dtos(&positions)))
}

fn to_dtos(positions: &[crate::estimator::TrainPosition]) -> Vec<ActiveTrainDto> {
    positions.iter().map(ActiveTrainDto::from).collect()
}

/// The current time-of-day in the timetable's timezone.
fn current_time_of_day(tz: Tz) -> Result<TimeOfDay, AppError> {
    let now = Utc::now().with_timezone(&tz).time();
    TimeOfDay::from_hm(now.hour(), now.minute()).map_err(|e| AppError::Internal {
        message: format!("clock out of range: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
