use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of a valuation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a fresh random job id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for JobId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle state of a job.
///
/// A job starts `Pending` and moves exactly once to `Finished` or `Failed`.
/// The valuation result only exists on `Finished`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Finished { value: i64 },
    Failed { reason: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }

    /// Short lowercase label used in logs, metrics and API responses.
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Finished { .. } => "finished",
            JobStatus::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One valuation request and its lifecycle record.
///
/// `id`, `owner_id` and `content` are fixed at creation. Callers only ever
/// hold snapshots; the store owns the live record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub owner_id: String,
    pub content: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a new pending job with a fresh id.
    pub fn new(owner_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            owner_id: owner_id.into(),
            content: content.into(),
            status: JobStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Valuation result, present only once the job has finished.
    pub fn value(&self) -> Option<i64> {
        match self.status {
            JobStatus::Finished { value } => Some(value),
            _ => None,
        }
    }
}
