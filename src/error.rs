//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the API server.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Configuration Errors**: the upstream API key is missing
/// - **Upstream Errors**: OpenRouter is unreachable or rejected the call
/// - **Validation Errors**: invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No OpenRouter API key was supplied to the deployment.
    ///
    /// Returns HTTP 500, matching the deployment contract: the server starts
    /// with placeholder configuration and reports the gap per request.
    #[error("OpenRouter API key not configured")]
    ApiKeyMissing,

    /// The HTTP call to OpenRouter failed (timeout, DNS, connection reset,
    /// or an unparseable body).
    ///
    /// Returns HTTP 502 Bad Gateway.
    #[error("Error calling OpenRouter API: {0}")]
    Upstream(#[from] reqwest::Error),

    /// OpenRouter answered with a non-success status.
    ///
    /// Returns HTTP 502 Bad Gateway. `category` is a coarse classification
    /// (rate_limit, invalid_request, upstream_error, request_error) used in
    /// logs and the error message.
    #[error("OpenRouter API error ({category}, status {status}): {detail}")]
    UpstreamStatus {
        status: u16,
        category: &'static str,
        detail: String,
    },

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `ApiKeyMissing` → 500 Internal Server Error
/// - `Upstream` / `UpstreamStatus` → 502 Bad Gateway
/// - `InvalidRequest` → 400 Bad Request
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::ApiKeyMissing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "api_key_missing",
                self.to_string(),
            ),
            AppError::Upstream(_) => {
                (StatusCode::BAD_GATEWAY, "upstream_error", self.to_string())
            }
            AppError::UpstreamStatus { .. } => {
                (StatusCode::BAD_GATEWAY, "upstream_error", self.to_string())
            }
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_maps_to_500() {
        let response = AppError::ApiKeyMissing.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_status_maps_to_502() {
        let err = AppError::UpstreamStatus {
            status: 429,
            category: "rate_limit",
            detail: "slow down".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_request_maps_to_400() {
        let response = AppError::InvalidRequest("bad model id".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
