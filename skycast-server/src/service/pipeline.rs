//! Pipeline runner
//!
//! Drives a single job through the prediction stages, writing stage and
//! progress into the store at the start of each phase so pollers see
//! forward motion while a collaborator call is still in flight.
//!
//! A runner never lets an error escape its task: every failure is
//! captured into the job's terminal `error` field.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value as JsonValue;
use skycast_core::domain::job::{JobFailure, JobStage, ResultEnvelope};
use tracing::{info, warn};
use uuid::Uuid;

use crate::collab::{DelayPredictor, WeatherProvider};
use crate::store::{JobPatch, JobStore};

/// Per-job stage driver
pub struct PipelineRunner {
    store: Arc<JobStore>,
    weather: Arc<dyn WeatherProvider>,
    predictor: Arc<dyn DelayPredictor>,
}

impl PipelineRunner {
    pub fn new(
        store: Arc<JobStore>,
        weather: Arc<dyn WeatherProvider>,
        predictor: Arc<dyn DelayPredictor>,
    ) -> Self {
        Self {
            store,
            weather,
            predictor,
        }
    }

    /// Runs the job to a terminal state
    ///
    /// Failed stages are terminal; there is no retry.
    pub async fn run(&self, job_id: Uuid, flights: Vec<JsonValue>) {
        match self.execute(job_id, &flights).await {
            Ok(envelope) => {
                info!(
                    "Job {} done with {} augmented record(s)",
                    job_id, envelope.count
                );
                self.store.update(job_id, JobPatch::done(envelope));
            }
            Err(failure) => {
                warn!("Job {} failed: {:?} {}", job_id, failure.code, failure.message);
                self.store.update(job_id, JobPatch::failed(failure));
            }
        }
    }

    async fn execute(
        &self,
        job_id: Uuid,
        flights: &[JsonValue],
    ) -> Result<ResultEnvelope, JobFailure> {
        self.store.update(job_id, JobPatch::advance(JobStage::Validating));
        if flights.is_empty() {
            return Err(JobFailure::validation("no flights provided"));
        }

        self.store
            .update(job_id, JobPatch::advance(JobStage::FetchingWeather));
        let weather = self
            .weather
            .fetch(flights)
            .await
            .map_err(|e| JobFailure::internal(format!("{e:#}")))?;

        self.store
            .update(job_id, JobPatch::advance(JobStage::Predicting));
        let results = self
            .predictor
            .predict(flights, &weather)
            .await
            .map_err(|e| JobFailure::internal(format!("{e:#}")))?;

        Ok(ResultEnvelope {
            job_id,
            generated_at: Utc::now(),
            count: results.len(),
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{StandardDelayPredictor, StandardWeatherProvider};
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use skycast_core::domain::job::{FailureCode, Job, JobStatus};
    use skycast_core::domain::weather::WeatherSummary;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    fn instant_runner(store: Arc<JobStore>) -> PipelineRunner {
        PipelineRunner::new(
            store,
            Arc::new(StandardWeatherProvider::new(Duration::ZERO)),
            Arc::new(StandardDelayPredictor::new(Duration::ZERO)),
        )
    }

    fn queued_job(store: &JobStore) -> Uuid {
        let job = Job::queued(Uuid::new_v4());
        let id = job.id;
        store.insert(job);
        id
    }

    /// Weather stub that parks callers until the test opens the gate
    struct GatedWeather {
        gate: Arc<Semaphore>,
    }

    #[async_trait]
    impl WeatherProvider for GatedWeather {
        async fn fetch(&self, _flights: &[JsonValue]) -> Result<WeatherSummary> {
            let _permit = self.gate.acquire().await?;
            Ok(WeatherSummary {
                source: "gated".to_string(),
                temperature_c: 10.0,
                wind_speed_kts: 5.0,
                visibility_km: 10.0,
            })
        }
    }

    struct FailingWeather;

    #[async_trait]
    impl WeatherProvider for FailingWeather {
        async fn fetch(&self, _flights: &[JsonValue]) -> Result<WeatherSummary> {
            anyhow::bail!("weather upstream unavailable")
        }
    }

    async fn wait_until(mut check: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !check() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn test_successful_run_produces_the_envelope() {
        let store = Arc::new(JobStore::new());
        let runner = instant_runner(store.clone());
        let id = queued_job(&store);

        let flights = vec![json!({"flightNumber": "SC201"}), json!({"flightNumber": "SC202"})];
        runner.run(id, flights).await;

        let job = store.get(id).unwrap();
        assert_eq!(job.status, JobStatus::Done);
        assert_eq!(job.stage, JobStage::Done);
        assert_eq!(job.progress, 100);
        assert!(job.error.is_none());

        let envelope = job.result.unwrap();
        assert_eq!(envelope.job_id, id);
        assert_eq!(envelope.count, 2);
        assert_eq!(envelope.results.len(), 2);
        assert!(envelope.results[0]["estimatedDelay"].is_i64());
    }

    #[tokio::test]
    async fn test_empty_batch_fails_validation() {
        let store = Arc::new(JobStore::new());
        let runner = instant_runner(store.clone());
        let id = queued_job(&store);

        runner.run(id, Vec::new()).await;

        let job = store.get(id).unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.stage, JobStage::Failed);
        assert_eq!(job.progress, 100);
        assert!(job.result.is_none());

        let failure = job.error.unwrap();
        assert_eq!(failure.code, FailureCode::Validation);
    }

    #[tokio::test]
    async fn test_collaborator_failure_is_captured_as_internal() {
        let store = Arc::new(JobStore::new());
        let runner = PipelineRunner::new(
            store.clone(),
            Arc::new(FailingWeather),
            Arc::new(StandardDelayPredictor::new(Duration::ZERO)),
        );
        let id = queued_job(&store);

        runner.run(id, vec![json!({"flightNumber": "SC203"})]).await;

        let job = store.get(id).unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        let failure = job.error.unwrap();
        assert_eq!(failure.code, FailureCode::Internal);
        assert!(failure.message.contains("weather upstream unavailable"));
    }

    #[tokio::test]
    async fn test_non_object_record_fails_the_job() {
        let store = Arc::new(JobStore::new());
        let runner = instant_runner(store.clone());
        let id = queued_job(&store);

        runner.run(id, vec![json!([1, 2, 3])]).await;

        let job = store.get(id).unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.unwrap().code, FailureCode::Internal);
    }

    #[tokio::test]
    async fn test_progress_is_reported_while_a_call_is_in_flight() {
        let store = Arc::new(JobStore::new());
        let gate = Arc::new(Semaphore::new(0));
        let runner = Arc::new(PipelineRunner::new(
            store.clone(),
            Arc::new(GatedWeather { gate: gate.clone() }),
            Arc::new(StandardDelayPredictor::new(Duration::ZERO)),
        ));
        let id = queued_job(&store);

        let handle = {
            let runner = runner.clone();
            tokio::spawn(async move { runner.run(id, vec![json!({"flightNumber": "SC204"})]).await })
        };

        // the weather call is parked, but the stage is already visible
        {
            let store = store.clone();
            wait_until(move || {
                store
                    .get(id)
                    .is_some_and(|job| job.stage == JobStage::FetchingWeather)
            })
            .await;
        }
        let job = store.get(id).unwrap();
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.progress, 25);
        assert!(job.result.is_none());
        assert!(job.error.is_none());

        gate.add_permits(1);
        handle.await.unwrap();
        assert_eq!(store.get(id).unwrap().status, JobStatus::Done);
    }

    #[tokio::test]
    async fn test_run_survives_a_reaped_job() {
        let store = Arc::new(JobStore::new());
        let runner = instant_runner(store.clone());
        let id = queued_job(&store);

        // evicted mid-flight; every update becomes a no-op
        store.remove(id);
        runner.run(id, vec![json!({"flightNumber": "SC205"})]).await;

        assert!(store.get(id).is_none());
        assert!(store.is_empty());
    }
}
