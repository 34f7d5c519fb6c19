//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Tracked state of one batch-prediction request
///
/// Records are owned by the store; queries receive cloned snapshots, so
/// a reader never holds a live reference into shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub status: JobStatus,
    pub stage: JobStage,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub result: Option<ResultEnvelope>,
    pub error: Option<JobFailure>,
}

impl Job {
    /// Creates a freshly accepted job, not yet admitted for execution
    pub fn queued(id: Uuid) -> Self {
        Self {
            id,
            status: JobStatus::Queued,
            stage: JobStage::Queued,
            progress: 0,
            created_at: Utc::now(),
            result: None,
            error: None,
        }
    }

    /// True once the job reached `done` or `failed`
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Job execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Done,
    Failed,
}

impl JobStatus {
    /// True for `done` and `failed`; no further transitions occur
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

/// Pipeline phase of a job, finer grained than [`JobStatus`]
///
/// Advances only forward while the job runs and freezes on a terminal
/// status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    Queued,
    Validating,
    FetchingWeather,
    Predicting,
    Done,
    Failed,
}

impl JobStage {
    /// Progress floor reported when the stage is entered
    ///
    /// Reported at the start of each phase so pollers see forward motion
    /// while a long collaborator call is still in flight.
    pub fn progress(self) -> u8 {
        match self {
            JobStage::Queued => 0,
            JobStage::Validating => 5,
            JobStage::FetchingWeather => 25,
            JobStage::Predicting => 70,
            JobStage::Done => 100,
            JobStage::Failed => 100,
        }
    }
}

/// Failure class stored on a job that terminated `failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
    /// The submitted batch did not pass pipeline validation
    Validation,
    /// A collaborator call or the pipeline itself errored
    Internal,
}

/// Terminal failure cause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFailure {
    pub code: FailureCode,
    pub message: String,
}

impl JobFailure {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: FailureCode::Validation,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: FailureCode::Internal,
            message: message.into(),
        }
    }
}

/// Payload written when a job completes successfully
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    pub job_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    /// The input flight records, each augmented with an `estimatedDelay`
    /// field (minutes)
    pub results: Vec<JsonValue>,
}
