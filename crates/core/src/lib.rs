pub mod admission;
pub mod auth;
pub mod config;
pub mod job;
pub mod metrics;
pub mod quota;
pub mod testing;

pub use admission::{AdmissionError, AdmissionService};
pub use auth::{
    create_authenticator, ApiKeyAuthenticator, AuthError, AuthRequest, Authenticator, Identity,
    NoneAuthenticator,
};
pub use config::{
    load_config, load_config_from_str, validate_config, ApiConfig, AuthConfig, AuthMethod,
    Config, ConfigError, EvaluationConfig, QuotaConfig, SanitizedConfig, ServerConfig,
};
pub use job::{
    EvaluationError, EvaluationOutcome, Evaluator, InMemoryJobStore, Job, JobError, JobId,
    JobStatus, JobStore, SimulatedEvaluator,
};
pub use quota::{InMemoryQuotaLedger, QuotaError, QuotaLedger, QuotaToken, QuotaTokenId};
