//! Server configuration
//!
//! Defines all configurable parameters for the server including the
//! bind address, admission capacity, and job retention window.

use std::time::Duration;

/// Server configuration
///
/// All limits and intervals are configurable to allow tuning for
/// different deployment scenarios (dev vs prod, fast vs slow
/// collaborators).
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (e.g., "0.0.0.0:8080")
    pub bind_addr: String,

    /// Max pipelines executing at once; excess jobs wait for admission
    pub max_parallel_jobs: usize,

    /// How long a job record is retained after creation, finished or not
    pub job_ttl: Duration,

    /// How often the background sweep evicts expired jobs
    pub reap_interval: Duration,

    /// Simulated latency of the standard weather provider
    pub weather_latency: Duration,

    /// Simulated latency of the standard delay predictor
    pub predict_latency: Duration,
}

impl Config {
    /// Creates a configuration with defaults
    pub fn new() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            max_parallel_jobs: 4,
            job_ttl: Duration::from_secs(15 * 60),
            reap_interval: Duration::from_secs(60),
            weather_latency: Duration::from_millis(600),
            predict_latency: Duration::from_millis(700),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables, all optional:
    /// - BIND_ADDR (default: "0.0.0.0:8080")
    /// - MAX_PARALLEL_JOBS (default: 4)
    /// - JOB_TTL_SECS (default: 900)
    /// - REAP_INTERVAL_SECS (default: 60)
    /// - WEATHER_LATENCY_MS (default: 600)
    /// - PREDICT_LATENCY_MS (default: 700)
    pub fn from_env() -> Self {
        let defaults = Self::new();

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);

        let max_parallel_jobs = std::env::var("MAX_PARALLEL_JOBS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_parallel_jobs);

        let job_ttl = std::env::var("JOB_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.job_ttl);

        let reap_interval = std::env::var("REAP_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.reap_interval);

        let weather_latency = std::env::var("WEATHER_LATENCY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.weather_latency);

        let predict_latency = std::env::var("PREDICT_LATENCY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.predict_latency);

        Self {
            bind_addr,
            max_parallel_jobs,
            job_ttl,
            reap_interval,
            weather_latency,
            predict_latency,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.max_parallel_jobs == 0 {
            anyhow::bail!("max_parallel_jobs must be greater than 0");
        }

        if self.job_ttl.as_secs() == 0 {
            anyhow::bail!("job_ttl must be greater than 0");
        }

        if self.reap_interval.as_secs() == 0 {
            anyhow::bail!("reap_interval must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
