//! API Module
//!
//! HTTP API layer for the prediction service.
//! Each submodule handles endpoints for a specific concern.

pub mod error;
pub mod health;
pub mod jobs;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::job::JobService;

/// Create the main API router with all endpoints
pub fn create_router(service: Arc<JobService>) -> Router {
    // The browser frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Job endpoints
        .route("/jobs", post(jobs::submit_job))
        .route("/jobs/{id}", get(jobs::get_job_status))
        .route("/jobs/{id}/result", get(jobs::get_job_result))
        // Add state and middleware
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
