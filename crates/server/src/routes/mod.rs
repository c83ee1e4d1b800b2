//! API route handlers
//!
//! - `health`: liveness, readiness, and basic metrics
//! - `embed`: batch image embedding (uploads and/or URLs)
//! - `search`: single-image embedding

pub mod embed;
pub mod health;
pub mod search;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info. Root endpoint (GET /).
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "pixvec",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/embed",
            "/search",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
