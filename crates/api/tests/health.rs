//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get, post_json, send, FakeGenerator};

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with the fixed payload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let generator = FakeGenerator::new(vec![]);
    let app = build_test_app(generator.clone());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["message"], "Marathi Story Generator API is running");

    // Liveness never reaches the upstream API.
    assert_eq!(generator.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns the 404 envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404_envelope() {
    let app = build_test_app(FakeGenerator::new(vec![]));
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Route not found");
}

#[tokio::test]
async fn wrong_method_on_api_route_returns_404_envelope() {
    let generator = FakeGenerator::new(vec![]);
    let app = build_test_app(generator.clone());

    for uri in ["/api/story", "/api/image"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {uri}");

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Route not found");
    }
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn wrong_method_on_health_returns_404_envelope() {
    let app = build_test_app(FakeGenerator::new(vec![]));
    let response = post_json(app, "/health", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Route not found");
}

#[tokio::test]
async fn unknown_api_path_returns_404_envelope() {
    let app = build_test_app(FakeGenerator::new(vec![]));
    let response = post_json(app, "/api/nope", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Route not found");
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app(FakeGenerator::new(vec![]));
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a valid UUID (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: CORS preflight allows the configured frontend with credentials
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_frontend_origin() {
    let app = build_test_app(FakeGenerator::new(vec![]));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/story")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
    let allow_methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(allow_methods.contains("POST"), "got: {allow_methods}");
}

#[tokio::test]
async fn cors_does_not_echo_foreign_origin() {
    let app = build_test_app(FakeGenerator::new(vec![]));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("Origin", "https://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
