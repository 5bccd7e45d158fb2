//! Liveness endpoint
//!
//! Never touches the database, so it stays green while Postgres is down.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Name reported by `/health`
pub const SERVICE_NAME: &str = "uploadtoken";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
