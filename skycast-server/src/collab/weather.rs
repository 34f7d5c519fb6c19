//! Weather collaborator
//!
//! Supplies the conditions summary the predictor uses as features. The
//! standard implementation stands in for a real weather API.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use skycast_core::domain::weather::WeatherSummary;
use tracing::debug;

/// Collaborator that fetches conditions for a flight batch
///
/// Calls may block for an unbounded but expected-short duration and may
/// fail; the pipeline captures failures into the job record.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches a conditions summary relevant to the given flight batch
    async fn fetch(&self, flights: &[JsonValue]) -> Result<WeatherSummary>;
}

/// Stand-in for the external weather API
///
/// Sleeps for a configured latency, then reports nominal conditions.
pub struct StandardWeatherProvider {
    latency: Duration,
}

impl StandardWeatherProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl WeatherProvider for StandardWeatherProvider {
    async fn fetch(&self, flights: &[JsonValue]) -> Result<WeatherSummary> {
        debug!("Fetching weather for {} flight(s)", flights.len());

        tokio::time::sleep(self.latency).await;

        Ok(WeatherSummary {
            source: "standard-weather".to_string(),
            temperature_c: 11.0,
            wind_speed_kts: 9.0,
            visibility_km: 10.0,
        })
    }
}
