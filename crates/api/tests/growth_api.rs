//! HTTP-level integration tests for standards, evaluation, growth records
//! and chart data.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_auth, post_json, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;
use tumbuh_api::handlers::standards::seed_bundled_standards;

fn evaluation(age_months: i32, value: f64) -> serde_json::Value {
    json!({
        "measurement_type": "height_for_age",
        "age_months": age_months,
        "sex": "male",
        "value": value,
    })
}

async fn add_record(pool: &PgPool, token: &str, child_id: i64, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/children/{child_id}/growth-records"),
        body,
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Standards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_requires_auth_and_is_idempotent(pool: PgPool) {
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/standards/seed", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = common::register(&pool, "ibu_ani").await;
    for _ in 0..2 {
        let response =
            post_auth(common::build_test_app(pool.clone()), "/api/v1/standards/seed", &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let status = body_json(get(common::build_test_app(pool), "/api/v1/standards/status").await).await;
    assert_eq!(status["data"]["count"], 360);
    assert_eq!(status["data"]["bundled_count"], 360);
    assert_eq!(status["data"]["seeded"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_standards_list_filters(pool: PgPool) {
    seed_bundled_standards(&pool).await.unwrap();

    let response = get(
        common::build_test_app(pool),
        "/api/v1/standards?measurement_type=weight_for_age&sex=female",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let entries = body_json(response).await;
    let entries = entries["data"].as_array().unwrap();
    assert_eq!(entries.len(), 60);
    assert!(entries
        .iter()
        .all(|e| e["measurement_type"] == "weight_for_age" && e["sex"] == "female"));
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_evaluate_before_seeding_is_no_standard_data(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/growth/evaluate",
        evaluation(12, 75.7),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NO_STANDARD_DATA");
    assert_eq!(json["details"]["measurement_type"], "height_for_age");
    assert_eq!(json["details"]["sex"], "male");
    assert_eq!(json["details"]["age_months"], 12);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_evaluate_classifies_against_seeded_standards(pool: PgPool) {
    seed_bundled_standards(&pool).await.unwrap();

    // Boys' length at 12 months: -3 = 68.6, -2 = 71.0, +2 = 80.5, +3 = 82.9.
    for (value, status, label) in [
        (68.0, "severely_below", "Sangat Pendek"),
        (70.0, "below", "Pendek"),
        (71.0, "normal", "Normal"),
        (80.5, "above", "Tinggi"),
        (83.0, "severely_above", "Sangat Tinggi"),
    ] {
        let response = post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/growth/evaluate",
            evaluation(12, value),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], status, "value {value}");
        assert_eq!(json["data"]["label"], label, "value {value}");
        assert_eq!(json["data"]["references"].as_array().unwrap().len(), 5);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_evaluate_age_policy(pool: PgPool) {
    seed_bundled_standards(&pool).await.unwrap();

    // 30 months sits between the seeded 24 and 36 month rows.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/growth/evaluate",
        evaluation(30, 90.0),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let mut body = evaluation(30, 90.0);
    body["age_policy"] = json!("interpolate");
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/growth/evaluate", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["age_months"], 30);

    // Beyond the table, interpolation does not extrapolate.
    let mut body = evaluation(72, 110.0);
    body["age_policy"] = json!("interpolate");
    let response = post_json(common::build_test_app(pool), "/api/v1/growth/evaluate", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Growth records
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_records_carry_status_or_null(pool: PgPool) {
    seed_bundled_standards(&pool).await.unwrap();
    let token = common::register(&pool, "ibu_ani").await;
    let child_id = common::create_child(&pool, &token, "male", "2023-01-10").await;

    let created = add_record(
        &pool,
        &token,
        child_id,
        json!({ "measurement_type": "height_for_age", "value": 75.7, "recorded_date": "2024-01-10" }),
    )
    .await;
    assert_eq!(created["data"]["age_months"], 12);
    assert_eq!(created["data"]["status"], "normal");
    assert_eq!(created["data"]["status_label"], "Normal");

    // 4 months has no seeded row of its own.
    let created = add_record(
        &pool,
        &token,
        child_id,
        json!({ "measurement_type": "weight_for_age", "value": 6.5, "recorded_date": "2023-05-10" }),
    )
    .await;
    assert_eq!(created["data"]["age_months"], 4);
    assert!(created["data"]["status"].is_null());

    let uri = format!("/api/v1/children/{child_id}/growth-records?age_policy=interpolate");
    let listed = body_json(get_auth(common::build_test_app(pool.clone()), &uri, &token).await).await;
    let records = listed["data"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    // Ordered by recorded date; interpolation fills in the 4-month weight.
    assert_eq!(records[0]["age_months"], 4);
    assert_eq!(records[0]["status"], "normal");
    assert_eq!(records[0]["status_label"], "Normal");

    let uri = format!("/api/v1/children/{child_id}/growth-records?measurement_type=height_for_age");
    let listed = body_json(get_auth(common::build_test_app(pool), &uri, &token).await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_validation(pool: PgPool) {
    let token = common::register(&pool, "ibu_ani").await;
    let child_id = common::create_child(&pool, &token, "female", "2023-01-10").await;
    let uri = format!("/api/v1/children/{child_id}/growth-records");

    for body in [
        json!({ "measurement_type": "height_for_age", "value": 50.0, "recorded_date": "2022-12-31" }),
        json!({ "measurement_type": "height_for_age", "value": 500.0, "recorded_date": "2024-01-10" }),
        json!({ "measurement_type": "weight_for_age", "value": 0.0, "recorded_date": "2024-01-10" }),
    ] {
        let response =
            post_json_auth(common::build_test_app(pool.clone()), &uri, body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_update_rederives_age(pool: PgPool) {
    seed_bundled_standards(&pool).await.unwrap();
    let token = common::register(&pool, "ibu_ani").await;
    let child_id = common::create_child(&pool, &token, "male", "2023-01-10").await;

    let created = add_record(
        &pool,
        &token,
        child_id,
        json!({ "measurement_type": "height_for_age", "value": 75.7, "recorded_date": "2024-01-10" }),
    )
    .await;
    let record_id = created["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/children/{child_id}/growth-records/{record_id}"),
        json!({ "recorded_date": "2024-07-10", "value": 95.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["data"]["age_months"], 18);
    assert_eq!(updated["data"]["measurement_type"], "height_for_age");
    assert_eq!(updated["data"]["status"], "severely_above");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_growth_chart(pool: PgPool) {
    seed_bundled_standards(&pool).await.unwrap();
    let token = common::register(&pool, "ibu_ani").await;
    let child_id = common::create_child(&pool, &token, "female", "2023-01-10").await;

    for (value, date) in [(74.0, "2024-01-10"), (59.8, "2023-04-10")] {
        add_record(
            &pool,
            &token,
            child_id,
            json!({ "measurement_type": "height_for_age", "value": value, "recorded_date": date }),
        )
        .await;
    }

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/children/{child_id}/growth-chart?measurement_type=height_for_age"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let chart = body_json(response).await;
    assert_eq!(chart["data"]["unit"], "cm");
    assert_eq!(chart["data"]["sex"], "female");
    assert_eq!(chart["data"]["points"][0]["age_months"], 3);
    assert_eq!(chart["data"]["points"][1]["age_months"], 12);

    let curves = chart["data"]["curves"].as_array().unwrap();
    assert_eq!(curves.len(), 5);
    assert_eq!(curves[0]["z_score"], -3);
    assert_eq!(curves[0]["points"].as_array().unwrap().len(), 12);
}
