//! Chat HTTP handler.
//!
//! This module implements the main API endpoint:
//! - POST /api/chat - Forward a conversation to OpenRouter and return the reply

use axum::{Json, extract::State};

use crate::{
    error::AppError,
    models::chat::{ChatRequest, ChatResponse},
    services::openrouter::OpenRouterClient,
};

/// Request a chat completion.
///
/// # Endpoint
///
/// `POST /api/chat`
///
/// # Request Body
///
/// ```json
/// {
///   "messages": [{"role": "user", "content": "Hello!"}],
///   "model": "openai/gpt-3.5-turbo",
///   "max_tokens": 1000,
///   "temperature": 0.7
/// }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "response": "Hi! How can I help you today?",
///   "model": "openai/gpt-3.5-turbo"
/// }
/// ```
///
/// # Errors
///
/// - **500** when the deployment has no OpenRouter API key
/// - **502** when OpenRouter is unreachable or rejects the call
///
/// # Edge Cases
///
/// An upstream answer with no choices produces an empty `response` rather
/// than an error, and `model` falls back to the requested one when the
/// upstream does not report which model served the call.
pub async fn create_completion(
    State(router): State<OpenRouterClient>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let completion = router.chat_completion(&request).await?;

    let response = ChatResponse {
        response: completion.first_content().to_string(),
        model: completion.model.clone().unwrap_or(request.model),
    };

    Ok(Json(response))
}
