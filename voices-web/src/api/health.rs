//! Health check endpoint
//!
//! Answers without touching the store, so a slow or unavailable database
//! never makes the service look down to a load balancer.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
///
/// `store` names the configured list backend (`sqlite` or `memory`) so an
/// operator can spot a deployment accidentally running without persistence.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub store: String,
}

/// GET /health
///
/// Liveness check for monitoring. Always 200 while the process is serving.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "voices-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.service.store().backend_name().to_string(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
