//! Job DTOs for the HTTP surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::domain::job::{Job, JobFailure, JobStage, JobStatus};

/// Request to submit a batch of flights for prediction
///
/// The batch is kept opaque here; the service rejects anything that is
/// not a JSON array before a job is created. A missing `flights` field
/// deserializes to `null` and is rejected the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitJobs {
    #[serde(default)]
    pub flights: JsonValue,
}

/// Accepted submission: the job id plus the two poll URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAccepted {
    pub job_id: Uuid,
    pub status_url: String,
    pub result_url: String,
}

/// Status view of a job: every field except the result payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusView {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub stage: JobStage,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JobFailure>,
}

impl From<Job> for JobStatusView {
    fn from(job: Job) -> Self {
        Self {
            job_id: job.id,
            status: job.status,
            stage: job.stage,
            progress: job.progress,
            created_at: job.created_at,
            error: job.error,
        }
    }
}

/// Progress payload returned when the result is requested too early
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPending {
    pub message: String,
    pub status: JobStatus,
    pub stage: JobStage,
    pub progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_view_drops_the_result() {
        let mut job = Job::queued(Uuid::new_v4());
        job.status = JobStatus::Done;
        job.stage = JobStage::Done;
        job.progress = 100;
        job.result = Some(crate::domain::job::ResultEnvelope {
            job_id: job.id,
            generated_at: Utc::now(),
            count: 0,
            results: Vec::new(),
        });

        let view = JobStatusView::from(job.clone());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["jobId"], serde_json::json!(job.id));
        assert_eq!(json["status"], serde_json::json!("done"));
        assert!(json.get("result").is_none());
        // absent error is omitted, not serialized as null
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_accepted_payload_uses_camel_case() {
        let accepted = JobAccepted {
            job_id: Uuid::new_v4(),
            status_url: "/jobs/x".to_string(),
            result_url: "/jobs/x/result".to_string(),
        };
        let json = serde_json::to_value(&accepted).unwrap();
        assert!(json.get("jobId").is_some());
        assert!(json.get("statusUrl").is_some());
        assert!(json.get("resultUrl").is_some());
    }
}
