//! Route definitions for children and their growth records.

use axum::routing::get;
use axum::Router;

use crate::handlers::{children, growth_records};
use crate::state::AppState;

/// Routes mounted at `/children`. All require auth.
///
/// The child segment is `{id}` throughout so the nested record routes share
/// one parameter name at that position.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// GET    /{id}/recipes                      -> recipes
/// GET    /{id}/growth-chart                 -> chart
///
/// GET    /{id}/growth-records               -> list_by_child
/// POST   /{id}/growth-records               -> create
/// GET    /{id}/growth-records/{record_id}   -> get_by_id
/// PUT    /{id}/growth-records/{record_id}   -> update
/// DELETE /{id}/growth-records/{record_id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    let record_routes = Router::new()
        .route(
            "/",
            get(growth_records::list_by_child).post(growth_records::create),
        )
        .route(
            "/{record_id}",
            get(growth_records::get_by_id)
                .put(growth_records::update)
                .delete(growth_records::delete),
        );

    Router::new()
        .route("/", get(children::list).post(children::create))
        .route(
            "/{id}",
            get(children::get_by_id)
                .put(children::update)
                .delete(children::delete),
        )
        .route("/{id}/recipes", get(children::recipes))
        .route("/{id}/growth-chart", get(growth_records::chart))
        .nest("/{id}/growth-records", record_routes)
}
