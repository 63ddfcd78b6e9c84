//! Handler for stand-alone growth evaluation (`POST /growth/evaluate`).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tumbuh_core::error::CoreError;
use tumbuh_core::growth::{
    evaluate, evaluate_with_table, AgePolicy, MeasurementInput, MeasurementType, Sex,
};
use tumbuh_db::repositories::StandardRepo;

use crate::error::AppResult;
use crate::handlers::standards::{load_table, rows_to_entries};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /growth/evaluate`.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub measurement_type: MeasurementType,
    pub age_months: i32,
    pub sex: Sex,
    pub value: f64,
    #[serde(default)]
    pub age_policy: AgePolicy,
}

/// POST /api/v1/growth/evaluate
///
/// Classify one measurement against the stored standards. Answers 422
/// `NO_STANDARD_DATA` when the standards do not cover the input.
pub async fn evaluate_measurement(
    State(state): State<AppState>,
    Json(input): Json<EvaluateRequest>,
) -> AppResult<impl IntoResponse> {
    if input.age_months < 0 {
        return Err(CoreError::Validation("age_months must not be negative".into()).into());
    }

    let measurement = MeasurementInput {
        measurement_type: input.measurement_type,
        age_months: input.age_months,
        sex: input.sex,
        value: input.value,
    };

    let assessment = match input.age_policy {
        AgePolicy::Exact => {
            let rows = StandardRepo::find_for(
                &state.pool,
                input.measurement_type,
                input.age_months,
                input.sex,
            )
            .await?;
            evaluate(&measurement, &rows_to_entries(&rows)?)?
        }
        AgePolicy::Interpolate => {
            let table = load_table(&state.pool, Some(input.measurement_type), input.sex).await?;
            evaluate_with_table(&measurement, &table, AgePolicy::Interpolate)?
        }
    };

    Ok(Json(DataResponse { data: assessment }))
}
