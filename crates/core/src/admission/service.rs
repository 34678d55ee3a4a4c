use std::sync::Arc;
use tracing::{debug, warn};

use super::AdmissionError;
use crate::auth::Identity;
use crate::job::{Job, JobError, JobId, JobStore};
use crate::metrics::QUOTA_ROLLBACKS_TOTAL;
use crate::quota::QuotaLedger;

/// Couples quota reservation to job creation.
///
/// A job is only enqueued while its owner holds a fresh quota token. If the
/// enqueue fails the token goes straight back to the ledger. A token that
/// admitted a job is left to expire on its own, so it tracks admission
/// pressure rather than job completion.
pub struct AdmissionService {
    jobs: Arc<dyn JobStore>,
    quota: Arc<dyn QuotaLedger>,
}

impl AdmissionService {
    pub fn new(jobs: Arc<dyn JobStore>, quota: Arc<dyn QuotaLedger>) -> Self {
        Self { jobs, quota }
    }

    pub fn quota(&self) -> &dyn QuotaLedger {
        self.quota.as_ref()
    }

    /// Admit and enqueue a new job for the identity's owner.
    pub async fn create_job(
        &self,
        identity: &Identity,
        content: &str,
    ) -> Result<Job, AdmissionError> {
        let owner_id = identity.owner_id();
        let token = self.quota.reserve(owner_id).await?;

        match self.jobs.enqueue(owner_id, content).await {
            Ok(job) => {
                debug!(job_id = %job.id, token_id = %token.id, owner_id, "Job admitted");
                Ok(job)
            }
            Err(e) => {
                let released = self.quota.release(&token.id).await;
                QUOTA_ROLLBACKS_TOTAL.inc();
                warn!(
                    owner_id,
                    token_id = %token.id,
                    released,
                    error = %e,
                    "Enqueue failed, quota token returned"
                );
                Err(AdmissionError::Enqueue(e))
            }
        }
    }

    /// Every job the identity's owner has created, oldest first.
    pub async fn jobs_for(&self, identity: &Identity) -> Result<Vec<Job>, AdmissionError> {
        self.jobs
            .get_by_owner_id(identity.owner_id())
            .await
            .map_err(AdmissionError::Store)
    }

    /// A single job, visible only to its owner.
    pub async fn job_for(&self, identity: &Identity, id: JobId) -> Result<Job, AdmissionError> {
        let job = self.jobs.get_by_id(id).await.map_err(|e| match e {
            JobError::NotFound(id) => AdmissionError::NotFound(id),
            other => AdmissionError::Store(other),
        })?;

        // Foreign jobs look exactly like missing ones.
        if job.owner_id != identity.owner_id() {
            return Err(AdmissionError::NotFound(id));
        }

        Ok(job)
    }
}
