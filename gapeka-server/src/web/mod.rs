//! Web layer: the transport boundary around the estimator.
//!
//! Provides the positions endpoint, a health check, and static asset
//! serving. Failures surface to the caller as a generic JSON error with a
//! message, never stack traces.

mod dto;
mod routes;
mod state;

pub use dto::{ActiveTrainDto, ErrorResponse, PositionsQuery};
pub use routes::{AppError, create_router};
pub use state::AppState;
