//! HTTP-level integration tests for nutrition intake and recipes.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

fn intake(child_id: Option<i64>, date: &str, energy_kcal: f64) -> serde_json::Value {
    json!({
        "child_id": child_id,
        "intake_date": date,
        "meal_type": "lunch",
        "food_name": "Bubur ayam",
        "portion_grams": 150.0,
        "energy_kcal": energy_kcal,
        "protein_g": 6.0,
    })
}

async fn add_intake(pool: &PgPool, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/nutrition-intakes",
        body,
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_intake_defaults_missing_nutrients_to_zero(pool: PgPool) {
    let token = common::register(&pool, "ibu_ani").await;

    let created = add_intake(&pool, &token, intake(None, "2025-03-01", 250.0)).await;
    assert_eq!(created["data"]["energy_kcal"], 250.0);
    assert_eq!(created["data"]["fat_g"], 0.0);
    assert!(created["data"]["child_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_intake_crud_and_ownership(pool: PgPool) {
    let token = common::register(&pool, "ibu_ani").await;
    let stranger = common::register(&pool, "ibu_lain").await;

    let created = add_intake(&pool, &token, intake(None, "2025-03-01", 250.0)).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/nutrition-intakes/{id}");

    let response = get_auth(common::build_test_app(pool.clone()), &uri, &stranger).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "meal_type": "dinner", "fat_g": 3.5 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["meal_type"], "dinner");
    assert_eq!(updated["data"]["fat_g"], 3.5);
    assert_eq!(updated["data"]["energy_kcal"], 250.0);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(common::build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_intake_validation(pool: PgPool) {
    let token = common::register(&pool, "ibu_ani").await;
    let stranger = common::register(&pool, "ibu_lain").await;
    let foreign_child = common::create_child(&pool, &stranger, "male", "2023-01-10").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/nutrition-intakes",
        intake(None, "2025-03-01", -1.0),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut blank = intake(None, "2025-03-01", 100.0);
    blank["food_name"] = json!("");
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/nutrition-intakes",
        blank,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/nutrition-intakes",
        intake(Some(foreign_child), "2025-03-01", 100.0),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_summary_groups_by_day(pool: PgPool) {
    let token = common::register(&pool, "ibu_ani").await;
    let child_id = common::create_child(&pool, &token, "female", "2023-01-10").await;

    add_intake(&pool, &token, intake(Some(child_id), "2025-03-02", 300.0)).await;
    add_intake(&pool, &token, intake(Some(child_id), "2025-03-01", 200.0)).await;
    add_intake(&pool, &token, intake(Some(child_id), "2025-03-02", 150.0)).await;
    add_intake(&pool, &token, intake(None, "2025-03-02", 700.0)).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/nutrition-intakes/summary?child_id={child_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = body_json(response).await;
    let days = summary["data"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2025-03-01");
    assert_eq!(days[1]["entry_count"], 2);
    assert_eq!(days[1]["totals"]["energy_kcal"], 450.0);
    assert_eq!(days[1]["totals"]["protein_g"], 12.0);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/nutrition-intakes?from=2025-03-02&to=2025-03-02",
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/nutrition-intakes?from=2025-03-05&to=2025-03-01",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recipes_filtered_by_age(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/recipes?age_months=7").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let recipes = json["data"].as_array().unwrap();
    assert!(!recipes.is_empty());
    for recipe in recipes {
        assert!(recipe["min_age_months"].as_i64().unwrap() <= 7);
        assert!(recipe["max_age_months"].as_i64().map_or(true, |max| max >= 7));
    }

    let id = recipes[0]["id"].as_i64().unwrap();
    let response = get(common::build_test_app(pool.clone()), &format!("/api/v1/recipes/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), "/api/v1/recipes/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_child_recipes_match_current_age(pool: PgPool) {
    let token = common::register(&pool, "ibu_ani").await;
    // Old enough that only open-ended toddler recipes remain.
    let child_id = common::create_child(&pool, &token, "female", "2023-01-10").await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/children/{child_id}/recipes"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let recipes = json["data"].as_array().unwrap();
    assert!(!recipes.is_empty());
    assert!(recipes.iter().all(|r| r["max_age_months"].is_null()));
}
