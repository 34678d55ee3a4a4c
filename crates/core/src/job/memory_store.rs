//! In-process job store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{
    EvaluationOutcome, Evaluator, Job, JobError, JobId, JobStatus, JobStore, SimulatedEvaluator,
};
use crate::metrics::{EVALUATIONS_TOTAL, JOBS_ENQUEUED};

/// Both job indexes, always mutated together under one lock.
#[derive(Debug, Default)]
struct JobIndex {
    by_id: HashMap<JobId, Job>,
    /// Job ids per owner in creation order.
    by_owner: HashMap<String, Vec<JobId>>,
}

impl JobIndex {
    fn insert(&mut self, job: Job) {
        self.by_owner
            .entry(job.owner_id.clone())
            .or_default()
            .push(job.id);
        self.by_id.insert(job.id, job);
    }

    fn owned_by(&self, owner_id: &str) -> Vec<Job> {
        self.by_owner
            .get(owner_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.by_id.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Apply an evaluation outcome. Only a pending job may transition.
    fn complete(
        &mut self,
        id: JobId,
        outcome: EvaluationOutcome,
    ) -> Result<Job, JobError> {
        let job = self.by_id.get_mut(&id).ok_or(JobError::NotFound(id))?;

        if job.status.is_terminal() {
            return Err(JobError::AlreadyTerminal {
                id,
                status: job.status.clone(),
            });
        }

        job.status = match outcome {
            Ok(value) => JobStatus::Finished { value },
            Err(e) => JobStatus::Failed {
                reason: e.to_string(),
            },
        };
        Ok(job.clone())
    }
}

/// Job store holding every job in memory.
///
/// Each enqueued job gets its own detached evaluation task; that task is the
/// only writer of the job's status. Nothing survives a restart.
pub struct InMemoryJobStore {
    index: Arc<RwLock<JobIndex>>,
    evaluator: Arc<dyn Evaluator>,
}

impl InMemoryJobStore {
    pub fn new(evaluator: Arc<dyn Evaluator>) -> Self {
        Self {
            index: Arc::new(RwLock::new(JobIndex::default())),
            evaluator,
        }
    }

    /// Number of jobs ever recorded.
    pub async fn len(&self) -> usize {
        self.index.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn spawn_evaluation(&self, job: Job) {
        let index = Arc::clone(&self.index);
        let evaluator = Arc::clone(&self.evaluator);

        tokio::spawn(async move {
            let outcome = evaluator.evaluate(&job).await;

            let result = index.write().await.complete(job.id, outcome);
            match result {
                Ok(updated) => {
                    EVALUATIONS_TOTAL
                        .with_label_values(&[updated.status.label()])
                        .inc();
                    info!(job_id = %updated.id, status = %updated.status, "Job finished evaluation");
                }
                Err(e) => warn!(job_id = %job.id, error = %e, "Dropping evaluation outcome"),
            }
        });
    }
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self::new(Arc::new(SimulatedEvaluator::default()))
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn enqueue(&self, owner_id: &str, content: &str) -> Result<Job, JobError> {
        let job = Job::new(owner_id, content);

        self.index.write().await.insert(job.clone());
        JOBS_ENQUEUED.inc();
        info!(job_id = %job.id, owner_id, "Job scheduled for evaluation");

        self.spawn_evaluation(job.clone());

        Ok(job)
    }

    async fn get_by_id(&self, id: JobId) -> Result<Job, JobError> {
        self.index
            .read()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or(JobError::NotFound(id))
    }

    async fn get_by_owner_id(&self, owner_id: &str) -> Result<Vec<Job>, JobError> {
        Ok(self.index.read().await.owned_by(owner_id))
    }
}
