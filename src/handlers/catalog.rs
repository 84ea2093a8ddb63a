//! Model catalog HTTP handler.

use axum::{Json, extract::State};

use crate::{error::AppError, models::catalog::ModelList, services::openrouter::OpenRouterClient};

/// List the models available through OpenRouter.
///
/// # Endpoint
///
/// `GET /api/models`
///
/// # Response (200)
///
/// The upstream catalog envelope, passed through unmodified:
///
/// ```json
/// {
///   "data": [
///     {"id": "openai/gpt-3.5-turbo", "name": "GPT-3.5 Turbo", "context_length": 16385, ...}
///   ]
/// }
/// ```
///
/// # Errors
///
/// - **500** when the deployment has no OpenRouter API key
/// - **502** when OpenRouter is unreachable or rejects the call
pub async fn list_models(
    State(router): State<OpenRouterClient>,
) -> Result<Json<ModelList>, AppError> {
    Ok(Json(router.list_models().await?))
}
