//! Skycast Server
//!
//! Accepts flight batches over HTTP, runs the asynchronous prediction
//! pipeline over them with bounded concurrency, and serves polling
//! endpoints for progress and results.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Store: In-memory concurrent job registry
//! - Services: Business logic (submission boundary, pipeline driver,
//!   TTL reaper)
//! - Collaborators: Weather and predictor behind trait seams
//! - API: Axum router and handlers

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod collab;
pub mod config;
pub mod service;
pub mod store;

use crate::collab::{StandardDelayPredictor, StandardWeatherProvider};
use crate::config::Config;
use crate::service::job::JobService;
use crate::service::reaper;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skycast_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Skycast Server...");

    // Load configuration
    let config = Config::from_env();
    config.validate().expect("Invalid configuration");

    tracing::info!(
        "Admission capacity: {}, job TTL: {:?}",
        config.max_parallel_jobs,
        config.job_ttl
    );

    // Wire the service with the standard collaborators
    let weather = Arc::new(StandardWeatherProvider::new(config.weather_latency));
    let predictor = Arc::new(StandardDelayPredictor::new(config.predict_latency));
    let service = JobService::new(&config, weather, predictor);

    // Start the background reaper
    let _sweeper = reaper::spawn_sweeper(service.store(), config.job_ttl, config.reap_interval);
    tracing::info!("Background sweeper spawned (interval: {:?})", config.reap_interval);

    // Build router with all API endpoints
    let app = api::create_router(service);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
