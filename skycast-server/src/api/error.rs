//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use skycast_core::domain::job::JobFailure;
use skycast_core::dto::job::JobPending;

use crate::service::job::JobServiceError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Result requested before the job reached a terminal state;
    /// carries the current progress so the client can keep polling
    NotFinished(JobPending),
    /// The job ran and failed; carries the stored failure cause
    JobFailed(JobFailure),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            ApiError::NotFinished(pending) => {
                (StatusCode::CONFLICT, Json(pending)).into_response()
            }
            ApiError::JobFailed(failure) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": failure })),
            )
                .into_response(),
        }
    }
}

impl From<JobServiceError> for ApiError {
    fn from(err: JobServiceError) -> Self {
        match err {
            JobServiceError::InvalidPayload => ApiError::BadRequest(err.to_string()),
            JobServiceError::NotFound(id) => ApiError::NotFound(format!("Job {} not found", id)),
            JobServiceError::Failed { failure, .. } => ApiError::JobFailed(failure),
            JobServiceError::NotFinished { pending, .. } => ApiError::NotFinished(pending),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::domain::job::{JobStage, JobStatus};
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = JobServiceError::NotFound(Uuid::new_v4()).into();
        assert_eq!(
            not_found.into_response().status(),
            StatusCode::NOT_FOUND
        );

        let bad_request: ApiError = JobServiceError::InvalidPayload.into();
        assert_eq!(
            bad_request.into_response().status(),
            StatusCode::BAD_REQUEST
        );

        let not_finished: ApiError = JobServiceError::NotFinished {
            id: Uuid::new_v4(),
            pending: JobPending {
                message: "Job not finished yet".to_string(),
                status: JobStatus::Running,
                stage: JobStage::Predicting,
                progress: 70,
            },
        }
        .into();
        assert_eq!(not_finished.into_response().status(), StatusCode::CONFLICT);

        let failed: ApiError = JobServiceError::Failed {
            id: Uuid::new_v4(),
            failure: JobFailure::internal("boom"),
        }
        .into();
        assert_eq!(
            failed.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
