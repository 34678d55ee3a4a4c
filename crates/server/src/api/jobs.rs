//! Patent valuation job handlers.

use axum::{
    extract::{rejection::StringRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use valuator_core::{Job, JobId};

use super::error::ApiError;
use super::middleware::AuthUser;
use crate::state::AppState;

/// Job representation returned to clients.
///
/// `value` is only present once the job has finished.
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_string(),
            status: job.status.label(),
            value: job.value(),
        }
    }
}

/// Submit content for valuation. The raw request body is the content.
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    content: Result<String, StringRejection>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    let content = content?;
    let job = state.admission().create_job(&identity, &content).await?;
    Ok((StatusCode::CREATED, Json(job.into())))
}

/// List the caller's jobs.
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    let jobs = state.admission().jobs_for(&identity).await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// Fetch one of the caller's jobs.
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let id: JobId = id
        .parse()
        .map_err(|_| ApiError::bad_request("malformed job id"))?;
    let job = state.admission().job_for(&identity, id).await?;
    Ok(Json(job.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuator_core::testing::fixtures;

    #[test]
    fn test_pending_response_omits_value() {
        let json = serde_json::to_value(JobResponse::from(fixtures::pending_job("Bob", "text")))
            .unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json.get("value").is_none());
    }

    #[test]
    fn test_finished_response_carries_value() {
        let job = fixtures::finished_job("Bob", "text", 42);
        let id = job.id.to_string();
        let json = serde_json::to_value(JobResponse::from(job)).unwrap();
        assert_eq!(json["id"], id);
        assert_eq!(json["status"], "finished");
        assert_eq!(json["value"], 42);
    }

    #[test]
    fn test_failed_response_omits_value() {
        let json =
            serde_json::to_value(JobResponse::from(fixtures::failed_job("Bob", "text", "boom")))
                .unwrap();
        assert_eq!(json["status"], "failed");
        assert!(json.get("value").is_none());
    }
}
