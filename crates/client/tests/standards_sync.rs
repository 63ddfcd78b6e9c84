use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use sqlx::PgPool;
use tumbuh_client::sync::{fetch_standards_table, mirror_standards};
use tumbuh_client::{ClientError, TumbuhApi};
use tumbuh_core::growth::{AgePolicy, MeasurementType, Sex};
use tumbuh_db::repositories::StandardRepo;

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn canned_standards() -> Router {
    Router::new().route(
        "/api/v1/standards",
        get(|| async {
            Json(json!({
                "data": [
                    {
                        "measurement_type": "weight_for_age",
                        "age_months": 0,
                        "sex": "female",
                        "z_score": 0,
                        "reference_value": 3.2
                    },
                    {
                        "measurement_type": "weight_for_age",
                        "age_months": 0,
                        "sex": "female",
                        "z_score": 2,
                        "reference_value": 4.2
                    }
                ]
            }))
        }),
    )
}

#[tokio::test]
async fn test_fetch_builds_table() {
    let url = spawn_server(canned_standards()).await;
    let api = TumbuhApi::with_client(reqwest::Client::new(), url);

    let table = fetch_standards_table(&api).await.unwrap();

    assert_eq!(table.len(), 2);
    let entries = table.lookup(MeasurementType::WeightForAge, Sex::Female, 0, AgePolicy::Exact);
    assert_eq!(entries[1].reference_value, 4.2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mirror_writes_fetched_entries(pool: PgPool) {
    let url = spawn_server(canned_standards()).await;
    let api = TumbuhApi::with_client(reqwest::Client::new(), url);

    let written = mirror_standards(&api, &pool).await.unwrap();
    assert_eq!(written, 2);
    assert_eq!(StandardRepo::count(&pool).await.unwrap(), 2);

    // Mirroring again replaces rather than duplicates.
    mirror_standards(&api, &pool).await.unwrap();
    assert_eq!(StandardRepo::count(&pool).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mirror_failure_writes_nothing(pool: PgPool) {
    let router = Router::new().route(
        "/api/v1/standards",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let url = spawn_server(router).await;
    let api = TumbuhApi::with_client(reqwest::Client::new(), url);

    let err = mirror_standards(&api, &pool).await.unwrap_err();

    assert_matches!(err, ClientError::Api { status: 503, .. });
    assert_eq!(StandardRepo::count(&pool).await.unwrap(), 0);
}
