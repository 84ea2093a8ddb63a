//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Calls the OpenRouter client
//! 3. Returns HTTP response (JSON, status code)

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::openrouter::OpenRouterClient;

/// Model catalog endpoint
pub mod catalog;
/// Chat completion endpoint
pub mod chat;
/// Liveness endpoints
pub mod health;

/// Build the HTTP router.
///
/// # Routes
///
/// - `GET /` - service banner
/// - `GET /health` - liveness probe
/// - `POST /api/chat` - chat completion
/// - `GET /api/models` - model catalog
///
/// # Middleware
///
/// - Permissive CORS: the API is consumed from browsers and arbitrary
///   frontends, so any origin is accepted
/// - Distributed tracing for observability
pub fn app(router_client: OpenRouterClient) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/api/chat", post(chat::create_completion))
        .route("/api/models", get(catalog::list_models))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(router_client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = Config {
            openrouter_api_key: None,
            app_url: "http://localhost:8000".to_string(),
            telegram_token: None,
            api_url: "http://localhost:8000".to_string(),
            default_model: "qwen/qwen-2.5-coder-32b-instruct:free".to_string(),
            server_port: 8000,
            openrouter_base_url: "https://openrouter.ai/api/v1".to_string(),
        };
        app(OpenRouterClient::new(&config).unwrap())
    }

    #[tokio::test]
    async fn root_serves_the_banner() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value["message"].as_str().unwrap().contains("companion bot"));
    }

    #[tokio::test]
    async fn health_reports_missing_key() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["upstream_key"], "missing");
    }

    #[tokio::test]
    async fn chat_without_a_key_is_a_server_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"messages": [{"role": "user", "content": "hi"}]}"#,
            ))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "api_key_missing");
    }
}
