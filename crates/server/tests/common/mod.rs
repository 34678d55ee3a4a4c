//! Common test utilities for in-process HTTP testing.
//!
//! The fixture builds the real router over either the in-memory job store or
//! a `MockJobStore`, with API-key auth configured for two owners.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::body::Bytes;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use valuator_core::testing::MockJobStore;
use valuator_core::{
    AdmissionService, ApiConfig, ApiKeyAuthenticator, AuthConfig, AuthMethod, Config,
    EvaluationConfig, InMemoryJobStore, InMemoryQuotaLedger, JobStore, QuotaConfig, QuotaLedger,
    ServerConfig, SimulatedEvaluator,
};
use valuator_server::{create_router, AppState};

/// Re-export fixtures for test convenience
pub use valuator_core::testing::fixtures;

pub const ALICE_KEY: &str = "alice-key";
pub const BOB_KEY: &str = "bob-key";

/// Evaluation delay used by the in-memory store.
pub const EVALUATION_DELAY: Duration = Duration::from_secs(120);

/// Quota token lifetime used by the ledger.
pub const TOKEN_TTL: Duration = Duration::from_secs(300);

/// In-process server with controllable collaborators.
pub struct TestFixture {
    pub router: Router,
    /// Set when the fixture was built over a mock job store.
    pub mock_jobs: Option<Arc<MockJobStore>>,
    pub ledger: Arc<InMemoryQuotaLedger>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Response with headers and an undecoded body
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// Decode the body as JSON; `Null` when it is not JSON.
    pub fn into_json(self) -> TestResponse {
        let body = if self.body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&self.body).unwrap_or(Value::Null)
        };
        TestResponse {
            status: self.status,
            body,
        }
    }
}

impl TestFixture {
    /// Fixture over the in-memory job store and ledger.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Fixture whose job store is a `MockJobStore`.
    pub fn with_mock_jobs() -> Self {
        Self::with_config(TestConfig {
            mock_jobs: true,
            ..TestConfig::default()
        })
    }

    pub fn with_config(test_config: TestConfig) -> Self {
        let api_keys = HashMap::from([
            (ALICE_KEY.to_string(), "Alice".to_string()),
            (BOB_KEY.to_string(), "Bob".to_string()),
        ]);

        let config = Config {
            auth: AuthConfig {
                method: AuthMethod::ApiKey,
                api_keys: api_keys.clone(),
                default_owner: None,
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
                graceful_shutdown_secs: 1,
            },
            api: ApiConfig {
                body_limit_bytes: test_config.body_limit_bytes,
                openapi_swagger_ui: test_config.openapi_swagger_ui,
                ..ApiConfig::default()
            },
            quota: QuotaConfig {
                ceiling: test_config.ceiling,
                token_ttl_secs: TOKEN_TTL.as_secs(),
                ..QuotaConfig::default()
            },
            evaluation: EvaluationConfig {
                delay_secs: EVALUATION_DELAY.as_secs(),
                placeholder_value: 42,
            },
        };

        let (jobs, mock_jobs) = if test_config.mock_jobs {
            let mock = Arc::new(MockJobStore::new());
            (Arc::clone(&mock) as Arc<dyn JobStore>, Some(mock))
        } else {
            let evaluator = SimulatedEvaluator::new(EVALUATION_DELAY, 42);
            let store = InMemoryJobStore::new(Arc::new(evaluator));
            (Arc::new(store) as Arc<dyn JobStore>, None)
        };

        let ledger = Arc::new(InMemoryQuotaLedger::new(test_config.ceiling, TOKEN_TTL));
        let admission =
            AdmissionService::new(jobs, Arc::clone(&ledger) as Arc<dyn QuotaLedger>);

        let mut state = AppState::new(
            config,
            Arc::new(ApiKeyAuthenticator::new(api_keys)),
            admission,
        );
        if let Some(document) = test_config.openapi_document {
            state = state.with_openapi_document(document);
        }

        Self {
            router: create_router(Arc::new(state)),
            mock_jobs,
            ledger,
        }
    }

    /// GET without credentials.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// GET as the owner behind `api_key`.
    pub async fn get_as(&self, api_key: &str, path: &str) -> TestResponse {
        self.request("GET", path, Some(api_key), None).await
    }

    /// POST a raw text body as the owner behind `api_key`.
    pub async fn post_text_as(&self, api_key: &str, path: &str, body: &str) -> TestResponse {
        self.request("POST", path, Some(api_key), Some(body)).await
    }

    /// POST a raw text body without credentials.
    pub async fn post_text(&self, path: &str, body: &str) -> TestResponse {
        self.request("POST", path, None, Some(body)).await
    }

    /// Raw GET returning the body as text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self.send(request).await;
        (
            response.status,
            String::from_utf8_lossy(&response.body).into_owned(),
        )
    }

    /// POST arbitrary bytes as the owner behind `api_key`.
    pub async fn post_bytes_as(&self, api_key: &str, path: &str, body: Vec<u8>) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("X-API-Key", api_key)
            .header("Content-Type", "text/plain")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await.into_json()
    }

    /// Send a prepared request and keep headers and raw body.
    pub async fn send(&self, request: Request<Body>) -> RawResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        RawResponse {
            status,
            headers,
            body,
        }
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        api_key: Option<&str>,
        body: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if let Some(key) = api_key {
            request_builder = request_builder.header("X-API-Key", key);
        }

        let body = match body {
            Some(text) => {
                request_builder = request_builder.header("Content-Type", "text/plain");
                Body::from(text.to_string())
            }
            None => Body::empty(),
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await.into_json()
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Back the service with a `MockJobStore`
    pub mock_jobs: bool,
    pub ceiling: usize,
    pub body_limit_bytes: usize,
    pub openapi_document: Option<String>,
    pub openapi_swagger_ui: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            mock_jobs: false,
            ceiling: 5,
            body_limit_bytes: ApiConfig::default().body_limit_bytes,
            openapi_document: None,
            openapi_swagger_ui: false,
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
