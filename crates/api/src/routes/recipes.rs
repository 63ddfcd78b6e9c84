//! Route definitions for the `/recipes` catalogue.

use axum::routing::get;
use axum::Router;

use crate::handlers::recipes;
use crate::state::AppState;

/// Routes mounted at `/recipes`.
///
/// ```text
/// GET /       -> list (?age_months=)
/// GET /{id}   -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipes::list))
        .route("/{id}", get(recipes::get_by_id))
}
