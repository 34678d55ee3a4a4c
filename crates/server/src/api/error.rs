//! Mapping of service errors onto HTTP responses.

use axum::{
    extract::rejection::StringRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use valuator_core::{AdmissionError, AuthError};

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An HTTP status paired with a client-visible message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<AdmissionError> for ApiError {
    fn from(err: AdmissionError) -> Self {
        let status = match &err {
            AdmissionError::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            AdmissionError::NotFound(_) => StatusCode::NOT_FOUND,
            AdmissionError::Quota(_)
            | AdmissionError::Enqueue(_)
            | AdmissionError::Store(_)
            | AdmissionError::IdentityMissing => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if !err.is_client_error() {
            tracing::error!(error = %err, "Request failed");
        }

        let message = match &err {
            AdmissionError::NotFound(_) => "job not found".to_string(),
            other => other.to_string(),
        };
        Self::new(status, message)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => Self::new(
                StatusCode::UNAUTHORIZED,
                "missing key X-API-Key in request header",
            ),
            AuthError::InvalidCredentials(_) => {
                Self::new(StatusCode::UNAUTHORIZED, "Unauthorized: API-Key auth failed")
            }
            AuthError::ConfigurationError(msg) => {
                tracing::error!(error = %msg, "Authenticator misconfigured");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "authentication unavailable")
            }
        }
    }
}

impl From<StringRejection> for ApiError {
    fn from(rejection: StringRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuator_core::{JobError, JobId, QuotaError};

    #[test]
    fn test_quota_exceeded_is_429() {
        let err = ApiError::from(AdmissionError::QuotaExceeded {
            owner_id: "Alice".to_string(),
            ceiling: 5,
        });
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_not_found_hides_job_id() {
        let id = JobId::new();
        let err = ApiError::from(AdmissionError::NotFound(id));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(!err.message.contains(&id.to_string()));
    }

    #[test]
    fn test_internal_failures_are_500() {
        for err in [
            AdmissionError::Enqueue(JobError::EnqueueFailed("x".to_string())),
            AdmissionError::Store(JobError::NotFound(JobId::new())),
            AdmissionError::Quota(QuotaError::Unavailable("x".to_string())),
            AdmissionError::IdentityMissing,
        ] {
            assert_eq!(ApiError::from(err).status, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_auth_errors_are_401() {
        assert_eq!(
            ApiError::from(AuthError::NotAuthenticated).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials("bad".to_string())).status,
            StatusCode::UNAUTHORIZED
        );
    }
}
