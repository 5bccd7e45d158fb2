//! HTTP server layer
//!
//! Axum server with:
//! - `GET /{org}/{repo}` upload token lookup
//! - `GET /health` liveness probe
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod response;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
