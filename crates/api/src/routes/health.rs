use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tumbuh_db::repositories::StandardRepo;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, otherwise `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Rows in `growth_standards`. Zero means every evaluation answers
    /// `NO_STANDARD_DATA` until the table is seeded.
    pub standards_entries: i64,
    pub standards_seeded: bool,
}

/// GET /health -- database reachability plus growth standards readiness.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = tumbuh_db::health_check(&state.pool).await.is_ok();

    let standards_entries = if db_healthy {
        match StandardRepo::count(&state.pool).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(error = %e, "Could not count growth standards");
                0
            }
        }
    } else {
        0
    };

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        standards_entries,
        standards_seeded: standards_entries > 0,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
