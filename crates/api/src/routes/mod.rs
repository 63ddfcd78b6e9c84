pub mod auth;
pub mod children;
pub mod health;
pub mod nutrition;
pub mod recipes;
pub mod standards;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /children                                        list, create
/// /children/{id}                                   get, update, delete
/// /children/{id}/recipes                           recipes for the child's age
/// /children/{id}/growth-chart                      chart points + curves
/// /children/{id}/growth-records                    list, create
/// /children/{id}/growth-records/{rid}              get, update, delete
///
/// /nutrition-intakes                               list, create
/// /nutrition-intakes/summary                       daily totals
/// /nutrition-intakes/{id}                          get, update, delete
///
/// /recipes                                         list (?age_months=)
/// /recipes/{id}                                    get
///
/// /standards                                       list (?measurement_type=&sex=)
/// /standards/status                                seeded count
/// /standards/seed                                  insert-or-replace bundled dataset
///
/// /growth/evaluate                                 classify one measurement
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/children", children::router())
        .nest("/nutrition-intakes", nutrition::router())
        .nest("/recipes", recipes::router())
        .nest("/standards", standards::router())
        .nest("/growth", standards::growth_router())
}
