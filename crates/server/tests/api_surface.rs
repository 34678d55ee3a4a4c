//! Unauthenticated endpoints: health, config, OpenAPI, metrics.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{TestConfig, TestFixture, ALICE_KEY};

const OPENAPI_TEMPLATE: &str = "openapi: 3.0.3\nservers:\n  - url: {{server_base_url}}/api/v0\n";

fn swagger_fixture(enabled: bool) -> TestFixture {
    TestFixture::with_config(TestConfig {
        openapi_document: Some(valuator_server::api::render_openapi_document(
            OPENAPI_TEMPLATE,
            "http://localhost:8080",
        )),
        openapi_swagger_ui: enabled,
        ..TestConfig::default()
    })
}

fn get_request(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v0/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({"status": "OK"}));
}

#[tokio::test]
async fn test_config_is_sanitized() {
    let fixture = TestFixture::new();

    let (status, text) = fixture.get_text("/api/v0/config").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!text.contains(ALICE_KEY));

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["auth"]["method"], "api_key");
    assert_eq!(json["auth"]["api_keys_configured"], 2);
    assert_eq!(json["quota"]["ceiling"], 5);
    assert_eq!(json["evaluation"]["placeholder_value"], 42);
}

#[tokio::test]
async fn test_openapi_absent_is_404() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v0/openapi").await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_openapi_served_as_yaml() {
    let document =
        valuator_server::api::render_openapi_document(OPENAPI_TEMPLATE, "http://localhost:8080");
    let fixture = TestFixture::with_config(TestConfig {
        openapi_document: Some(document),
        ..TestConfig::default()
    });

    let (status, text) = fixture.get_text("/api/v0/openapi").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.starts_with("openapi: 3.0.3"));
    assert!(text.contains("url: http://localhost:8080/api/v0"));
}

#[tokio::test]
async fn test_metrics_exposes_job_and_http_counters() {
    let fixture = TestFixture::new();
    fixture
        .post_text_as(ALICE_KEY, "/api/v0/patents", "x")
        .await;

    let (status, text) = fixture.get_text("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("valuator_jobs_enqueued_total"));
    assert!(text.contains("valuator_quota_reservations_total"));
    assert!(text.contains("valuator_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/health").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let fixture = TestFixture::new();

    let response = fixture.send(get_request("/api/v0/health")).await;
    assert_eq!(response.status, StatusCode::OK);
    let request_id = response
        .headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .expect("x-request-id header missing");
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_client_request_id_is_echoed() {
    let fixture = TestFixture::new();

    let request = Request::builder()
        .method("GET")
        .uri("/api/v0/patents")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();
    let response = fixture.send(request).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers["x-request-id"], "trace-me-123");
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let fixture = TestFixture::new();

    for path in ["/api/v0/health", "/api/v0/patents", "/api/v1/missing", "/metrics"] {
        let response = fixture.send(get_request(path)).await;
        assert_eq!(response.headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff", "{path}");
        assert_eq!(response.headers[header::X_FRAME_OPTIONS], "SAMEORIGIN", "{path}");
        assert_eq!(response.headers[header::X_XSS_PROTECTION], "1; mode=block", "{path}");
    }
}

#[tokio::test]
async fn test_swagger_ui_disabled_by_default() {
    let fixture = swagger_fixture(false);

    let (status, _) = fixture.get_text("/api/v0/openapi/openapi.yaml").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = fixture.get_text("/api/v0/openapi/ui/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = fixture.get_text("/api/v0/openapi").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_swagger_ui_serves_document_and_page() {
    let fixture = swagger_fixture(true);

    let (status, text) = fixture.get_text("/api/v0/openapi/openapi.yaml").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("url: http://localhost:8080/api/v0"));

    let response = fixture.send(get_request("/api/v0/openapi/ui/")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let page = String::from_utf8_lossy(&response.body);
    assert!(page.contains("swagger-ui"));
    assert!(page.contains("../openapi.yaml"));

    let (status, _) = fixture.get_text("/api/v0/openapi/ui/index.html").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_swagger_ui_without_slash_redirects() {
    let fixture = swagger_fixture(true);

    let response = fixture.send(get_request("/api/v0/openapi/ui")).await;
    assert_eq!(response.status, StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers[header::LOCATION], "ui/");
}
