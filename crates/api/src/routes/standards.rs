//! Route definitions for growth standards and evaluation.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{growth, standards};
use crate::state::AppState;

/// Routes mounted at `/standards`.
///
/// ```text
/// GET  /         -> list (?measurement_type=&sex=)
/// GET  /status   -> status
/// POST /seed     -> seed (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(standards::list))
        .route("/status", get(standards::status))
        .route("/seed", post(standards::seed))
}

/// Routes mounted at `/growth`.
///
/// ```text
/// POST /evaluate -> evaluate_measurement
/// ```
pub fn growth_router() -> Router<AppState> {
    Router::new().route("/evaluate", post(growth::evaluate_measurement))
}
