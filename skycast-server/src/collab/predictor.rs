//! Delay predictor collaborator
//!
//! Augments each flight record with an estimated delay. The standard
//! implementation is a deterministic heuristic over the same features
//! the original model consumed (weather conditions plus the record's
//! optional priority).

use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};
use skycast_core::domain::weather::WeatherSummary;
use tracing::debug;

/// Collaborator that produces the augmented records, one per input flight
#[async_trait]
pub trait DelayPredictor: Send + Sync {
    /// Returns each input record with an added `estimatedDelay` field
    /// (minutes)
    async fn predict(
        &self,
        flights: &[JsonValue],
        weather: &WeatherSummary,
    ) -> Result<Vec<JsonValue>>;
}

/// Heuristic stand-in for the delay model
pub struct StandardDelayPredictor {
    latency: Duration,
}

impl StandardDelayPredictor {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

/// Estimated delay in minutes, clamped to the 0-120 range the model
/// was calibrated for
fn estimate_delay(weather: &WeatherSummary, priority: i64) -> i64 {
    let wind = weather.wind_speed_kts * 1.5;
    let low_visibility = (10.0 - weather.visibility_km).max(0.0) * 4.0;
    let cold = (5.0 - weather.temperature_c).max(0.0) * 2.0;

    let conditions = (wind + low_visibility + cold) as i64;
    (conditions + priority.max(0) * 3).clamp(0, 120)
}

#[async_trait]
impl DelayPredictor for StandardDelayPredictor {
    async fn predict(
        &self,
        flights: &[JsonValue],
        weather: &WeatherSummary,
    ) -> Result<Vec<JsonValue>> {
        debug!(
            "Predicting delays for {} flight(s) using weather from '{}'",
            flights.len(),
            weather.source
        );

        tokio::time::sleep(self.latency).await;

        let mut results = Vec::with_capacity(flights.len());
        for flight in flights {
            let Some(record) = flight.as_object() else {
                bail!("flight record is not a JSON object: {}", flight);
            };

            let priority = record
                .get("priority")
                .and_then(JsonValue::as_i64)
                .unwrap_or(1);

            let mut augmented = record.clone();
            augmented.insert(
                "estimatedDelay".to_string(),
                json!(estimate_delay(weather, priority)),
            );
            results.push(JsonValue::Object(augmented));
        }

        Ok(results)
    }
}
