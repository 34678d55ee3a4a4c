//! Job storage trait and errors.

use async_trait::async_trait;
use thiserror::Error;

use super::{Job, JobId, JobStatus};

/// Error type for job store operations.
#[derive(Debug, Clone, Error)]
pub enum JobError {
    /// No job with this id exists.
    #[error("Job not found: {0}")]
    NotFound(JobId),

    /// The backing queue refused or could not accept the job.
    #[error("Could not enqueue job: {0}")]
    EnqueueFailed(String),

    /// The job already reached a terminal state and cannot transition again.
    #[error("Job {id} is already {status}")]
    AlreadyTerminal { id: JobId, status: JobStatus },
}

/// Trait for job storage backends.
///
/// Implementations own the job records. Every returned `Job` is a snapshot
/// copy; later transitions are only visible through a new lookup.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Record a new pending job and start its evaluation out of band.
    async fn enqueue(&self, owner_id: &str, content: &str) -> Result<Job, JobError>;

    /// Get a job by id.
    async fn get_by_id(&self, id: JobId) -> Result<Job, JobError>;

    /// All jobs created by an owner, oldest first. Empty when none.
    async fn get_by_owner_id(&self, owner_id: &str) -> Result<Vec<Job>, JobError>;
}
