//! Handlers for the `/nutrition-intakes` resource.
//!
//! Entries belong to the authenticated parent. `child_id` is optional; when
//! present it must name one of the parent's own children.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tumbuh_core::error::CoreError;
use tumbuh_core::nutrition::{summarize_daily, validate_nutrient, validate_nutrients};
use tumbuh_core::types::DbId;
use tumbuh_db::models::nutrition_intake::{
    CreateNutritionIntake, NutritionIntakeFilter, UpdateNutritionIntake,
};
use tumbuh_db::repositories::NutritionIntakeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::children::find_child;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn intake_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "NutritionIntake",
        id,
    })
}

fn check_range(filter: &NutritionIntakeFilter) -> AppResult<()> {
    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(AppError::BadRequest(format!(
                "from ({from}) must not be after to ({to})"
            )));
        }
    }
    Ok(())
}

/// GET /api/v1/nutrition-intakes?child_id=&from=&to=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<NutritionIntakeFilter>,
) -> AppResult<impl IntoResponse> {
    check_range(&filter)?;
    let entries = NutritionIntakeRepo::list(&state.pool, auth.user_id, &filter).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/nutrition-intakes/summary?child_id=&from=&to=
///
/// Daily totals over the filtered entries, oldest day first.
pub async fn summary(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<NutritionIntakeFilter>,
) -> AppResult<impl IntoResponse> {
    check_range(&filter)?;
    let entries = NutritionIntakeRepo::list(&state.pool, auth.user_id, &filter).await?;
    let days = summarize_daily(entries.iter().map(|e| (e.intake_date, e.nutrients())));
    Ok(Json(DataResponse { data: days }))
}

/// POST /api/v1/nutrition-intakes
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNutritionIntake>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_nutrients(&input.nutrients, input.portion_grams)?;
    if let Some(child_id) = input.child_id {
        find_child(&state.pool, auth.user_id, child_id).await?;
    }

    let entry = NutritionIntakeRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::debug!(
        user_id = auth.user_id,
        intake_id = entry.id,
        child_id = ?entry.child_id,
        "Nutrition intake recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/nutrition-intakes/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = NutritionIntakeRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| intake_not_found(id))?;
    Ok(Json(DataResponse { data: entry }))
}

/// PUT /api/v1/nutrition-intakes/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNutritionIntake>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    for (name, value) in [
        ("portion_grams", input.portion_grams),
        ("energy_kcal", input.energy_kcal),
        ("protein_g", input.protein_g),
        ("fat_g", input.fat_g),
        ("carbohydrate_g", input.carbohydrate_g),
    ] {
        if let Some(value) = value {
            validate_nutrient(name, value)?;
        }
    }

    let entry = NutritionIntakeRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or_else(|| intake_not_found(id))?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/nutrition-intakes/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NutritionIntakeRepo::delete(&state.pool, auth.user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(intake_not_found(id))
    }
}
