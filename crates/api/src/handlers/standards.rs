//! Handlers for the `/standards` resource (WHO reference values).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;
use tumbuh_core::growth::standards::bundled_standards;
use tumbuh_core::growth::{MeasurementType, Sex, StandardEntry, StandardsTable};
use tumbuh_db::models::standard::{to_entries, StandardReference};
use tumbuh_db::repositories::StandardRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::StandardsFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// Seeding state of the standards table.
#[derive(Debug, Serialize)]
pub struct StandardsStatus {
    /// Rows currently stored.
    pub count: i64,
    /// Rows in the bundled dataset.
    pub bundled_count: usize,
    pub seeded: bool,
}

/// Result of a seed run.
#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub written: u64,
}

/// Insert-or-replace the bundled WHO dataset. Returns rows written.
pub async fn seed_bundled_standards(pool: &PgPool) -> AppResult<u64> {
    let entries = bundled_standards()?;
    let written = StandardRepo::upsert_many(pool, &entries).await?;
    tracing::info!(written, "Seeded bundled growth standards");
    Ok(written)
}

/// Convert stored rows to domain entries. A row that fails to parse means
/// the table holds values the CHECK constraints should have rejected.
pub fn rows_to_entries(rows: &[StandardReference]) -> AppResult<Vec<StandardEntry>> {
    to_entries(rows).map_err(|e| AppError::InternalError(format!("Malformed standard row: {e}")))
}

/// Build an in-memory table for one sex, optionally one measurement type.
pub async fn load_table(
    pool: &PgPool,
    measurement_type: Option<MeasurementType>,
    sex: Sex,
) -> AppResult<StandardsTable> {
    let rows = StandardRepo::list(pool, measurement_type, Some(sex)).await?;
    Ok(rows_to_entries(&rows)?.into_iter().collect())
}

/// GET /api/v1/standards?measurement_type=&sex=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<StandardsFilter>,
) -> AppResult<impl IntoResponse> {
    let rows = StandardRepo::list(&state.pool, filter.measurement_type, filter.sex).await?;
    let entries = rows_to_entries(&rows)?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/standards/status
pub async fn status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = StandardRepo::count(&state.pool).await?;
    let bundled_count = bundled_standards()?.len();
    Ok(Json(DataResponse {
        data: StandardsStatus {
            count,
            bundled_count,
            seeded: count > 0,
        },
    }))
}

/// POST /api/v1/standards/seed
///
/// Idempotent: running it twice leaves the same rows.
pub async fn seed(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::info!(user_id = auth.user_id, "Standards seed requested");
    let written = seed_bundled_standards(&state.pool).await?;
    Ok(Json(DataResponse {
        data: SeedResult { written },
    }))
}
