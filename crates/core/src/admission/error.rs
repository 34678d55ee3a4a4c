use thiserror::Error;

use crate::job::{JobError, JobId};
use crate::quota::QuotaError;

/// Errors surfaced by the admission service.
///
/// `QuotaExceeded` and `NotFound` are expected, client-facing outcomes; the
/// rest are infrastructure or wiring failures.
#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("Quota exceeded for {owner_id}: {ceiling} jobs already admitted")]
    QuotaExceeded { owner_id: String, ceiling: usize },

    /// Absent job, or a job owned by someone else.
    #[error("Job not found: {0}")]
    NotFound(JobId),

    #[error("Could not reserve quota: {0}")]
    Quota(#[source] QuotaError),

    #[error("Could not enqueue job: {0}")]
    Enqueue(#[source] JobError),

    #[error("Could not read jobs: {0}")]
    Store(#[source] JobError),

    #[error("Cannot get identity from request")]
    IdentityMissing,
}

impl AdmissionError {
    /// Whether the caller, not the service, is responsible for this outcome.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AdmissionError::QuotaExceeded { .. } | AdmissionError::NotFound(_)
        )
    }
}

impl From<QuotaError> for AdmissionError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::Exceeded { owner_id, ceiling } => {
                AdmissionError::QuotaExceeded { owner_id, ceiling }
            }
            other => AdmissionError::Quota(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_exceeded_maps_to_dedicated_variant() {
        let err = AdmissionError::from(QuotaError::Exceeded {
            owner_id: "Alice".to_string(),
            ceiling: 5,
        });
        assert!(matches!(err, AdmissionError::QuotaExceeded { ceiling: 5, .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_ledger_failure_is_internal() {
        let err = AdmissionError::from(QuotaError::Unavailable("down".to_string()));
        assert!(matches!(err, AdmissionError::Quota(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_enqueue_error_keeps_source() {
        use std::error::Error;

        let err = AdmissionError::Enqueue(JobError::EnqueueFailed("queue offline".to_string()));
        assert!(err.to_string().contains("queue offline"));
        assert!(err.source().is_some());
        assert!(!AdmissionError::IdentityMissing.is_client_error());
    }
}
