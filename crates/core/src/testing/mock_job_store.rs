//! Mock job store for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::job::{Job, JobError, JobId, JobStore};

/// Mock implementation of the JobStore trait.
///
/// Provides controllable behavior for testing:
/// - Preload jobs returned by lookups
/// - Force `enqueue` to fail
/// - Record every `enqueue` call
///
/// Enqueued jobs stay `Pending`; no evaluation runs.
#[derive(Debug, Default)]
pub struct MockJobStore {
    jobs: RwLock<Vec<Job>>,
    enqueue_error: RwLock<Option<JobError>>,
    enqueue_calls: RwLock<Vec<(String, String)>>,
}

impl MockJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a job visible to lookups.
    pub async fn insert_job(&self, job: Job) {
        self.jobs.write().await.push(job);
    }

    /// Fail every `enqueue` with this error until cleared with `None`.
    pub async fn set_enqueue_error(&self, error: Option<JobError>) {
        *self.enqueue_error.write().await = error;
    }

    /// `(owner_id, content)` of every enqueue attempt, in call order.
    pub async fn enqueue_calls(&self) -> Vec<(String, String)> {
        self.enqueue_calls.read().await.clone()
    }
}

#[async_trait]
impl JobStore for MockJobStore {
    async fn enqueue(&self, owner_id: &str, content: &str) -> Result<Job, JobError> {
        self.enqueue_calls
            .write()
            .await
            .push((owner_id.to_string(), content.to_string()));

        if let Some(error) = self.enqueue_error.read().await.clone() {
            return Err(error);
        }

        let job = Job::new(owner_id, content);
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn get_by_id(&self, id: JobId) -> Result<Job, JobError> {
        self.jobs
            .read()
            .await
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or(JobError::NotFound(id))
    }

    async fn get_by_owner_id(&self, owner_id: &str) -> Result<Vec<Job>, JobError> {
        Ok(self
            .jobs
            .read()
            .await
            .iter()
            .filter(|job| job.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
