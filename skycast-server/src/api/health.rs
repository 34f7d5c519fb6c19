//! Health Check API Handler
//!
//! Simple health check endpoint for monitoring and readiness probes.

use axum::{Json, response::IntoResponse};

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
