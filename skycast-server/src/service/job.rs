//! Job service
//!
//! Boundary of the job engine. Accepts submissions, assigns job
//! identity, schedules pipeline executions under the admission
//! semaphore, and serves status/result queries from the store.
//!
//! Submission is fire-and-forget: once a job is accepted, every later
//! outcome is discoverable only by polling.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value as JsonValue;
use skycast_core::domain::job::{Job, JobFailure, JobStatus, ResultEnvelope};
use skycast_core::dto::job::{JobAccepted, JobPending, JobStatusView};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info};
use uuid::Uuid;

use crate::collab::{DelayPredictor, WeatherProvider};
use crate::config::Config;
use crate::service::pipeline::PipelineRunner;
use crate::service::reaper;
use crate::store::JobStore;

/// Service error type
#[derive(Debug, Error)]
pub enum JobServiceError {
    #[error("expected a JSON object with 'flights': [ ... ]")]
    InvalidPayload,
    #[error("job {0} not found")]
    NotFound(Uuid),
    #[error("job {id} failed")]
    Failed { id: Uuid, failure: JobFailure },
    #[error("job {id} not finished yet")]
    NotFinished { id: Uuid, pending: JobPending },
}

/// Submission and polling boundary
pub struct JobService {
    store: Arc<JobStore>,
    permits: Arc<Semaphore>,
    runner: Arc<PipelineRunner>,
    job_ttl: Duration,
}

impl JobService {
    /// Wires the service with its store, admission semaphore, and
    /// collaborators
    pub fn new(
        config: &Config,
        weather: Arc<dyn WeatherProvider>,
        predictor: Arc<dyn DelayPredictor>,
    ) -> Arc<Self> {
        let store = Arc::new(JobStore::new());
        let runner = Arc::new(PipelineRunner::new(store.clone(), weather, predictor));

        Arc::new(Self {
            store,
            permits: Arc::new(Semaphore::new(config.max_parallel_jobs)),
            runner,
            job_ttl: config.job_ttl,
        })
    }

    /// The store backing this service, for the background sweeper
    pub fn store(&self) -> Arc<JobStore> {
        self.store.clone()
    }

    /// Accepts a flight batch and schedules its pipeline run
    ///
    /// Returns as soon as the job is registered; the caller never waits
    /// on pipeline work. Anything that is not a JSON array is rejected
    /// here, before a job id is issued.
    pub fn submit(&self, flights: JsonValue) -> Result<JobAccepted, JobServiceError> {
        let JsonValue::Array(flights) = flights else {
            return Err(JobServiceError::InvalidPayload);
        };

        reaper::sweep(&self.store, self.job_ttl);

        let job = Job::queued(Uuid::new_v4());
        let id = job.id;
        self.store.insert(job);

        info!("Job {} accepted with {} flight(s)", id, flights.len());
        debug!(
            "{} job(s) tracked, {} running",
            self.store.len(),
            self.store.running_count()
        );

        let runner = self.runner.clone();
        let permits = self.permits.clone();
        tokio::spawn(async move {
            // The semaphore is never closed; an acquire error can only
            // mean shutdown.
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            runner.run(id, flights).await;
            // permit released on drop, error paths included
        });

        Ok(JobAccepted {
            job_id: id,
            status_url: format!("/jobs/{id}"),
            result_url: format!("/jobs/{id}/result"),
        })
    }

    /// Current state of a job, without the result payload
    pub fn status(&self, id: Uuid) -> Result<JobStatusView, JobServiceError> {
        let job = self
            .store
            .get(id)
            .ok_or(JobServiceError::NotFound(id))?;
        Ok(JobStatusView::from(job))
    }

    /// The result envelope, or the reason it is not available yet
    pub fn result(&self, id: Uuid) -> Result<ResultEnvelope, JobServiceError> {
        let job = self
            .store
            .get(id)
            .ok_or(JobServiceError::NotFound(id))?;

        match (job.status, job.result, job.error) {
            (JobStatus::Done, Some(envelope), _) => Ok(envelope),
            (JobStatus::Failed, _, Some(failure)) => Err(JobServiceError::Failed { id, failure }),
            (status, _, _) => Err(JobServiceError::NotFinished {
                id,
                pending: JobPending {
                    message: "Job not finished yet".to_string(),
                    status,
                    stage: job.stage,
                    progress: job.progress,
                },
            }),
        }
    }
}
