#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use orbit_forecast::db::repositories::LocalRepository;
use orbit_forecast::http::{create_router, AppState};

use support::seeded_repo;

fn app(repo: LocalRepository) -> Router {
    create_router(AppState::new(Arc::new(repo)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = app(LocalRepository::new());
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["repository"], "connected");
}

#[tokio::test]
async fn test_import_then_list_gyms() {
    let app = app(LocalRepository::new());
    let batch = json!({
        "records": [
            {"date_set": "2024-02-05", "setter": "Alice", "discipline": "boulders"},
            {"date_set": "2024-02-06", "setter": "Alice, Bob", "discipline": "Routes"}
        ]
    });

    let (status, summary) =
        send(&app, Method::POST, "/v1/gyms/G1/records", Some(batch.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(summary["stored"], 2);

    let (status, summary) = send(&app, Method::POST, "/v1/gyms/G1/records", Some(batch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["duplicate"], true);

    let (_, gyms) = send(&app, Method::GET, "/v1/gyms", None).await;
    assert_eq!(gyms["total"], 1);
    assert_eq!(gyms["gyms"][0]["gym_code"], "G1");
    assert_eq!(gyms["gyms"][0]["record_count"], 2);
}

#[tokio::test]
async fn test_import_rejects_foreign_gym() {
    let app = app(LocalRepository::new());
    let batch = json!({
        "records": [{"date_set": "2024-02-05", "setter": "Alice", "gym_code": "G2", "discipline": "Boulders"}]
    });

    let (status, body) = send(&app, Method::POST, "/v1/gyms/G1/records", Some(batch)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_forecast_with_explicit_date() {
    let app = app(seeded_repo().await);
    let (status, forecast) =
        send(&app, Method::GET, "/v1/gyms/G1/forecast?as_of=2024-03-01", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(forecast["weekly_horsepower"], 15.0);
    assert_eq!(forecast["projected_weeks"], 6.7);
    assert_eq!(forecast["status"], "lagging");
    assert_eq!(forecast["disciplines"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_forecast_without_capacity_reports_null_projection() {
    let app = app(seeded_repo().await);
    let (_, body) = send(
        &app,
        Method::PUT,
        "/v1/settings/variance-buffer",
        Some(json!({"percent": 100.0})),
    )
    .await;
    assert_eq!(body["percent"], 100.0);

    let (_, forecast) =
        send(&app, Method::GET, "/v1/gyms/G1/forecast?as_of=2024-03-01", None).await;
    assert!(forecast["projected_weeks"].is_null());
    assert_eq!(forecast["status"], "critical");
}

#[tokio::test]
async fn test_variance_buffer_is_clamped() {
    let app = app(LocalRepository::new());
    let (status, body) = send(
        &app,
        Method::PUT,
        "/v1/settings/variance-buffer",
        Some(json!({"percent": 250.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["percent"], 100.0);

    let (_, body) = send(&app, Method::GET, "/v1/settings/variance-buffer", None).await;
    assert_eq!(body["percent"], 100.0);
}

#[tokio::test]
async fn test_outlook_has_52_points() {
    let app = app(seeded_repo().await);
    let (status, body) =
        send(&app, Method::GET, "/v1/gyms/G1/outlook?as_of=2024-03-01", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["as_of"], "2024-03-01");
    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 52);
    assert_eq!(points[0]["capacity"], 15.0);
    assert_eq!(points[51]["date"], "2025-02-21");
}

#[tokio::test]
async fn test_orbit_targets_round_trip_and_validation() {
    let app = app(LocalRepository::new());
    let orbits = json!([
        {"orbit_name": "Lead", "discipline": "Routes", "total_climbs": 80.0, "rotation_target": 8.0}
    ]);

    let (status, stored) = send(&app, Method::PUT, "/v1/gyms/G3/orbits", Some(orbits)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored[0]["orbit_name"], "Lead");

    let bad = json!([
        {"orbit_name": "Lead", "discipline": "Routes", "total_climbs": 80.0, "rotation_target": -1.0}
    ]);
    let (status, _) = send(&app, Method::PUT, "/v1/gyms/G3/orbits", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send(&app, Method::GET, "/v1/gyms/G3/orbits", None).await;
    assert_eq!(stored.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_shift_overrides_are_stored() {
    let app = app(LocalRepository::new());
    let shifts = json!([{"name": "Alice", "date": "2024-03-04", "gym_code": "G1", "working": false}]);

    let (status, _) = send(&app, Method::PUT, "/v1/gyms/G1/shifts", Some(shifts)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stored) = send(&app, Method::GET, "/v1/gyms/G1/shifts", None).await;
    assert_eq!(stored[0]["working"], false);
}

#[tokio::test]
async fn test_staff_override_lifecycle() {
    let app = app(seeded_repo().await);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/v1/staff/Bob",
        Some(json!({"avg_weekly_output": 4.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, staff) = send(&app, Method::GET, "/v1/staff?as_of=2024-03-01", None).await;
    assert_eq!(staff["baseline"]["Bob"]["avg_weekly_output"], 1.0);
    assert_eq!(staff["in_use"]["Bob"]["avg_weekly_output"], 4.0);

    let (status, _) = send(&app, Method::DELETE, "/v1/staff/Bob", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::DELETE, "/v1/staff/Bob", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_unbounded_lookback_includes_all_history() {
    let app = app(seeded_repo().await);
    let (status, staff) = send(
        &app,
        Method::GET,
        "/v1/staff?as_of=2024-03-01&lookback_days=4294967295",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(staff["baseline"]["Zed"]["avg_weekly_output"], 1.0);

    let (status, _) = send(
        &app,
        Method::GET,
        "/v1/gyms/G1/forecast?as_of=2024-03-01&lookback_days=4294967295",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_forecast_horizon_bounds() {
    let app = app(seeded_repo().await);

    let (status, forecast) =
        send(&app, Method::GET, "/v1/gyms/G1/forecast?as_of=2024-03-01&weeks=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(forecast["weekly_horsepower"], 15.0);

    let (status, _) =
        send(&app, Method::GET, "/v1/gyms/G1/forecast?as_of=2024-03-01&weeks=520", None).await;
    assert_eq!(status, StatusCode::OK);

    for weeks in ["521", "20000000"] {
        let uri = format!("/v1/gyms/G1/forecast?as_of=2024-03-01&weeks={}", weeks);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_reference_date_at_calendar_end_is_rejected() {
    let app = app(seeded_repo().await);
    let late = (chrono::NaiveDate::MAX - chrono::Duration::days(3))
        .to_string()
        .replace('+', "%2B");

    for path in ["forecast", "outlook"] {
        let uri = format!("/v1/gyms/G1/{}?as_of={}", path, late);
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

