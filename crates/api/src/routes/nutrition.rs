//! Route definitions for the `/nutrition-intakes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::nutrition;
use crate::state::AppState;

/// Routes mounted at `/nutrition-intakes`. All require auth.
///
/// ```text
/// GET    /          -> list (?child_id=&from=&to=)
/// POST   /          -> create
/// GET    /summary   -> summary (?child_id=&from=&to=)
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(nutrition::list).post(nutrition::create))
        .route("/summary", get(nutrition::summary))
        .route(
            "/{id}",
            get(nutrition::get_by_id)
                .put(nutrition::update)
                .delete(nutrition::delete),
        )
}
