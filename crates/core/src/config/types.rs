use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub quota: QuotaConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on draining in-flight requests at shutdown.
    #[serde(default = "default_graceful_shutdown_secs")]
    pub graceful_shutdown_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            graceful_shutdown_secs: default_graceful_shutdown_secs(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

fn default_graceful_shutdown_secs() -> u64 {
    10
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    /// API key -> owner id.
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
    /// Owner assigned to any key missing from `api_keys`.
    #[serde(default)]
    pub default_owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    None,
    ApiKey,
}

/// HTTP API surface configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
    /// OpenAPI document served at `/openapi`, if any.
    #[serde(default)]
    pub openapi_file: Option<PathBuf>,
    #[serde(default = "default_server_base_url")]
    pub server_base_url: String,
    /// Also serve `/openapi/openapi.yaml` and a Swagger UI under `/openapi/ui/`.
    #[serde(default)]
    pub openapi_swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            body_limit_bytes: default_body_limit_bytes(),
            openapi_file: None,
            server_base_url: default_server_base_url(),
            openapi_swagger_ui: false,
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_body_limit_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_server_base_url() -> String {
    "http://localhost:8080".to_string()
}

/// Admission quota configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotaConfig {
    /// Max outstanding tokens per owner.
    #[serde(default = "default_ceiling")]
    pub ceiling: usize,
    /// Seconds before an unreleased token expires.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Per-owner ceiling overrides.
    #[serde(default)]
    pub owner_ceilings: HashMap<String, usize>,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            ceiling: default_ceiling(),
            token_ttl_secs: default_token_ttl_secs(),
            owner_ceilings: HashMap::new(),
        }
    }
}

fn default_ceiling() -> usize {
    5
}

fn default_token_ttl_secs() -> u64 {
    300
}

/// Simulated evaluation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluationConfig {
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
    #[serde(default = "default_placeholder_value")]
    pub placeholder_value: i64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
            placeholder_value: default_placeholder_value(),
        }
    }
}

fn default_delay_secs() -> u64 {
    120
}

fn default_placeholder_value() -> i64 {
    42
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub quota: SanitizedQuotaConfig,
    pub evaluation: EvaluationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
    pub api_keys_configured: usize,
    pub default_owner_configured: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedQuotaConfig {
    pub ceiling: usize,
    pub token_ttl_secs: u64,
    pub owner_overrides: usize,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                method: match config.auth.method {
                    AuthMethod::None => "none".to_string(),
                    AuthMethod::ApiKey => "api_key".to_string(),
                },
                api_keys_configured: config.auth.api_keys.len(),
                default_owner_configured: config.auth.default_owner.is_some(),
            },
            server: config.server.clone(),
            quota: SanitizedQuotaConfig {
                ceiling: config.quota.ceiling,
                token_ttl_secs: config.quota.token_ttl_secs,
                owner_overrides: config.quota.owner_ceilings.len(),
            },
            evaluation: config.evaluation.clone(),
        }
    }
}
