//! Testing utilities and mock implementations.
//!
//! The mocks stand in for the job store and quota ledger so admission logic
//! and HTTP handlers can be exercised with scripted failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use valuator_core::testing::{MockJobStore, MockQuotaLedger};
//!
//! let jobs = Arc::new(MockJobStore::new());
//! jobs.set_enqueue_error(Some(JobError::EnqueueFailed("offline".into()))).await;
//!
//! let service = AdmissionService::new(jobs, Arc::new(MockQuotaLedger::new()));
//! ```

mod mock_job_store;
mod mock_quota_ledger;

pub use mock_job_store::MockJobStore;
pub use mock_quota_ledger::MockQuotaLedger;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::job::{Job, JobStatus};

    /// A pending job owned by `owner_id`.
    pub fn pending_job(owner_id: &str, content: &str) -> Job {
        Job::new(owner_id, content)
    }

    /// A job that already finished with `value`.
    pub fn finished_job(owner_id: &str, content: &str, value: i64) -> Job {
        Job {
            status: JobStatus::Finished { value },
            ..Job::new(owner_id, content)
        }
    }

    /// A job whose evaluation failed.
    pub fn failed_job(owner_id: &str, content: &str, reason: &str) -> Job {
        Job {
            status: JobStatus::Failed {
                reason: reason.to_string(),
            },
            ..Job::new(owner_id, content)
        }
    }
}
