//! Handlers for growth records nested under a child:
//! `/children/{child_id}/growth-records[/{id}]` and
//! `/children/{child_id}/growth-chart`.
//!
//! Records are returned with their evaluated status. A record whose age is
//! not covered by the stored standards carries `status: null`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tumbuh_core::error::CoreError;
use tumbuh_core::growth::age::age_in_months;
use tumbuh_core::growth::chart::{build_chart, ChartPoint};
use tumbuh_core::growth::{
    evaluate_with_table, AgePolicy, GrowthStatus, MeasurementInput, MeasurementType, Sex,
    StandardsTable,
};
use tumbuh_core::types::DbId;
use tumbuh_core::validation::{validate_measurement_value, validate_record_date};
use tumbuh_db::models::child::Child;
use tumbuh_db::models::growth_record::{
    CreateGrowthRecord, GrowthRecord, GrowthRecordValues, UpdateGrowthRecord,
};
use tumbuh_db::repositories::{GrowthRecordRepo, StandardRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::children::find_child;
use crate::handlers::standards::{load_table, rows_to_entries};
use crate::middleware::auth::AuthUser;
use crate::query::AgePolicyParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /growth-records`.
#[derive(Debug, Default, Deserialize)]
pub struct RecordListParams {
    pub measurement_type: Option<MeasurementType>,
    #[serde(default)]
    pub age_policy: AgePolicy,
}

/// Query parameters for `GET /growth-chart`.
#[derive(Debug, Deserialize)]
pub struct ChartParams {
    pub measurement_type: MeasurementType,
}

/// A growth record annotated with its evaluated status.
#[derive(Debug, Serialize)]
pub struct GrowthRecordWithStatus {
    #[serde(flatten)]
    pub record: GrowthRecord,
    /// `None` when the standards do not cover the record's age.
    pub status: Option<GrowthStatus>,
    pub status_label: Option<&'static str>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Evaluate a record against `table`, mapping missing data to `None`.
fn annotate(
    record: GrowthRecord,
    sex: Sex,
    table: &StandardsTable,
    policy: AgePolicy,
) -> AppResult<GrowthRecordWithStatus> {
    let measurement_type = record.measurement_type()?;
    let input = MeasurementInput {
        measurement_type,
        age_months: record.age_months,
        sex,
        value: record.value,
    };

    let (status, status_label) = match evaluate_with_table(&input, table, policy) {
        Ok(assessment) => (Some(assessment.status), Some(assessment.label)),
        Err(CoreError::NoStandardData { .. }) => (None, None),
        Err(e) => return Err(e.into()),
    };

    Ok(GrowthRecordWithStatus {
        record,
        status,
        status_label,
    })
}

/// Validate a measurement against the child and derive its age.
fn resolve_values(
    child: &Child,
    measurement_type: MeasurementType,
    value: f64,
    recorded_date: chrono::NaiveDate,
) -> AppResult<GrowthRecordValues> {
    validate_measurement_value(measurement_type, value)?;
    validate_record_date(child.birth_date, recorded_date, Utc::now().date_naive())?;
    let age_months = age_in_months(child.birth_date, recorded_date)?;

    Ok(GrowthRecordValues {
        measurement_type,
        age_months,
        value,
        recorded_date,
    })
}

fn record_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GrowthRecord",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/children/{child_id}/growth-records?measurement_type=&age_policy=
pub async fn list_by_child(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(child_id): Path<DbId>,
    Query(params): Query<RecordListParams>,
) -> AppResult<impl IntoResponse> {
    let child = find_child(&state.pool, auth.user_id, child_id).await?;
    let sex = child.sex()?;

    let records =
        GrowthRecordRepo::list_by_child(&state.pool, child_id, params.measurement_type).await?;
    let table = load_table(&state.pool, params.measurement_type, sex).await?;

    let annotated = records
        .into_iter()
        .map(|record| annotate(record, sex, &table, params.age_policy))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(DataResponse { data: annotated }))
}

/// POST /api/v1/children/{child_id}/growth-records
///
/// `age_months` is derived from the child's birth date and `recorded_date`.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(child_id): Path<DbId>,
    Json(input): Json<CreateGrowthRecord>,
) -> AppResult<impl IntoResponse> {
    let child = find_child(&state.pool, auth.user_id, child_id).await?;
    let sex = child.sex()?;
    let values = resolve_values(&child, input.measurement_type, input.value, input.recorded_date)?;

    let record = GrowthRecordRepo::create(&state.pool, child_id, &values).await?;

    tracing::info!(
        child_id,
        record_id = record.id,
        measurement_type = %values.measurement_type,
        age_months = values.age_months,
        "Growth record created"
    );

    let table = load_table(&state.pool, Some(values.measurement_type), sex).await?;
    let annotated = annotate(record, sex, &table, AgePolicy::Exact)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: annotated })))
}

/// GET /api/v1/children/{child_id}/growth-records/{id}?age_policy=
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((child_id, id)): Path<(DbId, DbId)>,
    Query(params): Query<AgePolicyParams>,
) -> AppResult<impl IntoResponse> {
    let child = find_child(&state.pool, auth.user_id, child_id).await?;
    let sex = child.sex()?;

    let record = GrowthRecordRepo::find_by_id(&state.pool, child_id, id)
        .await?
        .ok_or_else(|| record_not_found(id))?;

    let table = load_table(&state.pool, Some(record.measurement_type()?), sex).await?;
    let annotated = annotate(record, sex, &table, params.age_policy)?;
    Ok(Json(DataResponse { data: annotated }))
}

/// PUT /api/v1/children/{child_id}/growth-records/{id}
///
/// Omitted fields keep their stored value; the age is re-derived.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((child_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateGrowthRecord>,
) -> AppResult<impl IntoResponse> {
    let child = find_child(&state.pool, auth.user_id, child_id).await?;
    let sex = child.sex()?;

    let existing = GrowthRecordRepo::find_by_id(&state.pool, child_id, id)
        .await?
        .ok_or_else(|| record_not_found(id))?;

    let values = resolve_values(
        &child,
        match input.measurement_type {
            Some(m) => m,
            None => existing.measurement_type()?,
        },
        input.value.unwrap_or(existing.value),
        input.recorded_date.unwrap_or(existing.recorded_date),
    )?;

    let record = GrowthRecordRepo::update(&state.pool, child_id, id, &values)
        .await?
        .ok_or_else(|| record_not_found(id))?;

    let table = load_table(&state.pool, Some(values.measurement_type), sex).await?;
    let annotated = annotate(record, sex, &table, AgePolicy::Exact)?;
    Ok(Json(DataResponse { data: annotated }))
}

/// DELETE /api/v1/children/{child_id}/growth-records/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((child_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    find_child(&state.pool, auth.user_id, child_id).await?;

    if GrowthRecordRepo::delete(&state.pool, child_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(record_not_found(id))
    }
}

/// GET /api/v1/children/{child_id}/growth-chart?measurement_type=
///
/// The child's points for one indicator plus the reference curves for the
/// child's sex.
pub async fn chart(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(child_id): Path<DbId>,
    Query(params): Query<ChartParams>,
) -> AppResult<impl IntoResponse> {
    let child = find_child(&state.pool, auth.user_id, child_id).await?;
    let sex = child.sex()?;

    let points: Vec<ChartPoint> =
        GrowthRecordRepo::list_by_child(&state.pool, child_id, Some(params.measurement_type))
            .await?
            .iter()
            .map(|r| ChartPoint {
                age_months: r.age_months,
                value: r.value,
            })
            .collect();

    let rows = StandardRepo::list_for(&state.pool, params.measurement_type, sex).await?;
    let chart = build_chart(params.measurement_type, sex, points, &rows_to_entries(&rows)?);
    Ok(Json(DataResponse { data: chart }))
}
