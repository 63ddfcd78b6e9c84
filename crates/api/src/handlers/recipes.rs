//! Handlers for the read-only `/recipes` catalogue.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tumbuh_core::error::CoreError;
use tumbuh_core::types::DbId;
use tumbuh_db::repositories::RecipeRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /recipes`.
#[derive(Debug, Deserialize)]
pub struct RecipeListParams {
    pub age_months: Option<i32>,
}

/// GET /api/v1/recipes?age_months=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RecipeListParams>,
) -> AppResult<impl IntoResponse> {
    let recipes = match params.age_months {
        Some(age) if age < 0 => {
            return Err(AppError::BadRequest(
                "age_months must not be negative".into(),
            ))
        }
        Some(age) => RecipeRepo::list_for_age(&state.pool, age).await?,
        None => RecipeRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: recipes }))
}

/// GET /api/v1/recipes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = RecipeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id,
        }))?;
    Ok(Json(DataResponse { data: recipe }))
}
