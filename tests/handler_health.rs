mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use school_registry::routes::app_router;
use school_registry::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::memory_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["store"]["backend"], "memory");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let server = common::memory_server();

    let response = server.get("/v2/students").await;

    response.assert_status_not_found();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["path"], "/v2/students");
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let app = app_router(AppState::in_memory());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/students/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
