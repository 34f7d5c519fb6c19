//! Job store
//!
//! In-memory registry of job records. All mutation of job state goes
//! through this module, one write lock per operation, so a reader never
//! observes a half-applied update. Queries hand out cloned snapshots
//! rather than references into shared state.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use skycast_core::domain::job::{Job, JobFailure, JobStage, JobStatus, ResultEnvelope};
use uuid::Uuid;

/// Partial update applied to a stored job in one atomic step
#[derive(Debug, Default)]
pub struct JobPatch {
    pub status: Option<JobStatus>,
    pub stage: Option<JobStage>,
    pub progress: Option<u8>,
    pub result: Option<ResultEnvelope>,
    pub error: Option<JobFailure>,
}

impl JobPatch {
    /// Stage advance written at the start of a pipeline phase
    ///
    /// The first advance also flips the status to `running`; repeating
    /// that on later advances is harmless.
    pub fn advance(stage: JobStage) -> Self {
        Self {
            status: Some(JobStatus::Running),
            stage: Some(stage),
            progress: Some(stage.progress()),
            ..Default::default()
        }
    }

    /// Terminal success carrying the result envelope
    pub fn done(result: ResultEnvelope) -> Self {
        Self {
            status: Some(JobStatus::Done),
            stage: Some(JobStage::Done),
            progress: Some(100),
            result: Some(result),
            ..Default::default()
        }
    }

    /// Terminal failure carrying the cause
    pub fn failed(error: JobFailure) -> Self {
        Self {
            status: Some(JobStatus::Failed),
            stage: Some(JobStage::Failed),
            progress: Some(100),
            error: Some(error),
            ..Default::default()
        }
    }
}

/// In-memory concurrent job registry
pub struct JobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl JobStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new job record
    pub fn insert(&self, job: Job) {
        let mut jobs = self.jobs.write().unwrap();
        jobs.insert(job.id, job);
    }

    /// Returns a cloned snapshot of the record, if present
    pub fn get(&self, id: Uuid) -> Option<Job> {
        let jobs = self.jobs.read().unwrap();
        jobs.get(&id).cloned()
    }

    /// Applies a patch to the record under the write lock
    ///
    /// A missing id is a silent no-op: the job may have been reaped
    /// while its runner was still in flight.
    pub fn update(&self, id: Uuid, patch: JobPatch) {
        let mut jobs = self.jobs.write().unwrap();
        let Some(job) = jobs.get_mut(&id) else {
            return;
        };

        if let Some(status) = patch.status {
            job.status = status;
        }
        if let Some(stage) = patch.stage {
            job.stage = stage;
        }
        if let Some(progress) = patch.progress {
            job.progress = progress;
        }
        if let Some(result) = patch.result {
            job.result = Some(result);
        }
        if let Some(error) = patch.error {
            job.error = Some(error);
        }
    }

    /// Removes a record; returns whether it was present
    pub fn remove(&self, id: Uuid) -> bool {
        let mut jobs = self.jobs.write().unwrap();
        jobs.remove(&id).is_some()
    }

    /// Ids of every job whose TTL has elapsed, regardless of status
    pub fn expired_ids(&self, now: DateTime<Utc>, ttl: Duration) -> Vec<Uuid> {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let jobs = self.jobs.read().unwrap();
        jobs.values()
            .filter(|job| now.signed_duration_since(job.created_at) > ttl)
            .map(|job| job.id)
            .collect()
    }

    /// Number of jobs currently in `running` status
    pub fn running_count(&self) -> usize {
        let jobs = self.jobs.read().unwrap();
        jobs.values()
            .filter(|job| job.status == JobStatus::Running)
            .count()
    }

    /// Total number of stored records
    pub fn len(&self) -> usize {
        let jobs = self.jobs.read().unwrap();
        jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
