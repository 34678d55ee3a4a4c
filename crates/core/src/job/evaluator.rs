//! Valuation of job content.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use super::Job;

/// Error raised when a valuation cannot produce a value.
#[derive(Debug, Clone, Error)]
#[error("Evaluation failed: {0}")]
pub struct EvaluationError(pub String);

/// Result of a single evaluation.
pub type EvaluationOutcome = Result<i64, EvaluationError>;

/// Computes the value of a job.
///
/// Called from a background task, never on the request path.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, job: &Job) -> EvaluationOutcome;
}

/// Stand-in for the real valuation pipeline: waits, then yields a fixed value.
#[derive(Debug, Clone)]
pub struct SimulatedEvaluator {
    delay: Duration,
    value: i64,
}

impl SimulatedEvaluator {
    pub fn new(delay: Duration, value: i64) -> Self {
        Self { delay, value }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedEvaluator {
    fn default() -> Self {
        Self::new(Duration::from_secs(120), 42)
    }
}

#[async_trait]
impl Evaluator for SimulatedEvaluator {
    async fn evaluate(&self, job: &Job) -> EvaluationOutcome {
        tracing::debug!(job_id = %job.id, delay = ?self.delay, "Simulating evaluation");
        tokio::time::sleep(self.delay).await;
        Ok(self.value)
    }
}
