//! Job API Handlers
//!
//! HTTP endpoints for submitting prediction jobs and polling their
//! progress and results.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use skycast_core::domain::job::ResultEnvelope;
use skycast_core::dto::job::{JobAccepted, JobStatusView, SubmitJobs};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::service::job::JobService;

/// POST /jobs
/// Accept a flight batch and schedule its prediction pipeline
pub async fn submit_job(
    State(service): State<Arc<JobService>>,
    Json(req): Json<SubmitJobs>,
) -> ApiResult<Json<JobAccepted>> {
    tracing::info!("Submission received");

    let accepted = service.submit(req.flights)?;

    Ok(Json(accepted))
}

/// GET /jobs/{id}
/// Get job progress by ID, without the result payload
pub async fn get_job_status(
    State(service): State<Arc<JobService>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<JobStatusView>> {
    tracing::debug!("Getting status for job: {}", id);

    let view = service.status(id)?;

    Ok(Json(view))
}

/// GET /jobs/{id}/result
/// Get the result envelope once the job is done
pub async fn get_job_result(
    State(service): State<Arc<JobService>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ResultEnvelope>> {
    tracing::debug!("Getting result for job: {}", id);

    let envelope = service.result(id)?;

    Ok(Json(envelope))
}
