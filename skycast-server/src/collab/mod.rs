//! Pipeline collaborators
//!
//! The weather lookup and the delay predictor sit behind trait seams so
//! the pipeline treats them as opaque, possibly slow, possibly failing
//! calls. The standard implementations stand in for the real external
//! services and are injected at startup.
//!
//! All collaborators are trait-based to enable testing and dependency
//! injection.

mod predictor;
mod weather;

// Re-export traits
pub use predictor::DelayPredictor;
pub use weather::WeatherProvider;

// Re-export implementations
pub use predictor::StandardDelayPredictor;
pub use weather::StandardWeatherProvider;
