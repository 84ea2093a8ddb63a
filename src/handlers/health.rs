//! Health check and service banner endpoints.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::services::openrouter::OpenRouterClient;

/// Health check response.
///
/// Returns service status and whether the upstream key is configured.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Whether an OpenRouter API key is configured ("configured" / "missing")
    pub upstream_key: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "upstream_key": "configured",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// The endpoint never calls OpenRouter; a deployment without a key is still
/// "healthy" (it serves requests, each of which reports the missing key).
pub async fn health_check(State(router): State<OpenRouterClient>) -> Json<HealthResponse> {
    let upstream_key = if router.has_api_key() {
        "configured"
    } else {
        "missing"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        upstream_key: upstream_key.to_string(),
        timestamp: Utc::now(),
    })
}

/// Service banner at `GET /`.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Personal companion bot API is running. Use /api/chat and /api/models."
    }))
}
