//! Handlers for the `/children` resource.
//!
//! Children are owned by the authenticated parent; another user's child is
//! reported as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use sqlx::PgPool;
use tumbuh_core::error::CoreError;
use tumbuh_core::growth::age::age_in_months;
use tumbuh_core::types::DbId;
use tumbuh_core::validation::{validate_birth_date, validate_child_name};
use tumbuh_db::models::child::{Child, ChildUpdate, CreateChild, UpdateChild};
use tumbuh_db::repositories::{ChildRepo, RecipeRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a child owned by `user_id` or fail with 404.
pub async fn find_child(pool: &PgPool, user_id: DbId, id: DbId) -> AppResult<Child> {
    ChildRepo::find_owned(pool, user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Child", id }))
}

/// GET /api/v1/children
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let children = ChildRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: children }))
}

/// POST /api/v1/children
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateChild>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_child_name(&input.name)?;
    validate_birth_date(input.birth_date, Utc::now().date_naive())?;

    let child = ChildRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, child_id = child.id, "Child profile created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: child })))
}

/// GET /api/v1/children/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let child = find_child(&state.pool, auth.user_id, id).await?;
    Ok(Json(DataResponse { data: child }))
}

/// PUT /api/v1/children/{id}
///
/// Changing the birth date re-derives `age_months` on every growth record.
/// The change is rejected if any record would predate the new birth date.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChild>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(name) = &input.name {
        validate_child_name(name)?;
    }

    if let Some(birth_date) = input.birth_date {
        validate_birth_date(birth_date, Utc::now().date_naive())?;
    }

    match ChildRepo::update(&state.pool, auth.user_id, id, &input).await? {
        ChildUpdate::Updated {
            child,
            ages_rewritten,
        } => {
            if ages_rewritten > 0 {
                tracing::info!(child_id = id, ages_rewritten, "Re-derived growth record ages");
            }
            Ok(Json(DataResponse { data: child }))
        }
        ChildUpdate::NotFound => Err(AppError::Core(CoreError::NotFound { entity: "Child", id })),
        ChildUpdate::RecordBeforeBirth {
            record_id,
            recorded_date,
        } => Err(AppError::Core(CoreError::Validation(format!(
            "birth_date is after growth record {record_id} dated {recorded_date}"
        )))),
    }
}

/// DELETE /api/v1/children/{id}
///
/// Growth records and nutrition entries for the child are deleted with it.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ChildRepo::delete(&state.pool, auth.user_id, id).await? {
        tracing::info!(user_id = auth.user_id, child_id = id, "Child profile deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Child", id }))
    }
}

/// GET /api/v1/children/{id}/recipes
///
/// Recipes suitable for the child's current age.
pub async fn recipes(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let child = find_child(&state.pool, auth.user_id, id).await?;
    let age_months = age_in_months(child.birth_date, Utc::now().date_naive())?;
    let recipes = RecipeRepo::list_for_age(&state.pool, age_months).await?;
    Ok(Json(DataResponse { data: recipes }))
}
