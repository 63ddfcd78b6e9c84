//! HTTP-level integration tests for registration, login, refresh and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_auth, post_json, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

fn registration(username: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": TEST_PASSWORD,
        "full_name": "Ibu Tester",
    })
}

async fn login(pool: &PgPool, username: &str, password: &str) -> axum::response::Response {
    let body = json!({ "username": username, "password": password });
    post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", body).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_returns_tokens_without_password_hash(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/register", registration("ibu_ani")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 900);
    assert_eq!(json["user"]["username"], "ibu_ani");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_username_returns_409(pool: PgPool) {
    common::register(&pool, "ibu_ani").await;

    let mut body = registration("ibu_ani");
    body["email"] = json!("different@example.com");
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_validation(pool: PgPool) {
    let mut short_password = registration("ibu_ani");
    short_password["password"] = json!("1234567");
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/register",
        short_password,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut bad_email = registration("ibu_ani");
    bad_email["email"] = json!("not-an-email");
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/register", bad_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().starts_with("email:"));

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/register",
        registration("ab"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_by_username_or_email(pool: PgPool) {
    common::register(&pool, "ayah_budi").await;

    let response = login(&pool, "ayah_budi", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = login(&pool, "Ayah_Budi@Example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_returns_401(pool: PgPool) {
    common::register(&pool, "ayah_budi").await;

    let response = login(&pool, "ayah_budi", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(&pool, "nobody", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    common::register(&pool, "ibu_ani").await;
    let tokens = body_json(login(&pool, "ibu_ani", TEST_PASSWORD).await).await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap();

    let body = json!({ "refresh_token": refresh_token });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], tokens["refresh_token"]);

    // The old refresh token was revoked by the rotation.
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_refresh_spends_token_once(pool: PgPool) {
    common::register(&pool, "ibu_ani").await;
    let tokens = body_json(login(&pool, "ibu_ani", TEST_PASSWORD).await).await;
    let body = json!({ "refresh_token": tokens["refresh_token"] });

    let (first, second) = tokio::join!(
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body.clone()),
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::UNAUTHORIZED]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_refresh_tokens(pool: PgPool) {
    let access_token = common::register(&pool, "ibu_ani").await;
    let tokens = body_json(login(&pool, "ibu_ani", TEST_PASSWORD).await).await;

    let response = post_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/logout",
        &access_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = json!({ "refresh_token": tokens["refresh_token"] });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_route_requires_bearer_token(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/children").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response =
        get_auth(common::build_test_app(pool), "/api/v1/children", "garbage-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}
