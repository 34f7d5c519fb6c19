//! Weather domain types

use serde::{Deserialize, Serialize};

/// Conditions summary used as prediction features
///
/// Produced by the weather collaborator and passed opaquely to the
/// predictor; the job engine never inspects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    /// Label identifying where the summary came from
    pub source: String,
    pub temperature_c: f64,
    pub wind_speed_kts: f64,
    pub visibility_km: f64,
}
