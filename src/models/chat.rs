//! Chat data models and API request/response types.
//!
//! This module defines:
//! - `ChatMessage`: one turn of a conversation
//! - `ChatRequest`: body of `POST /api/chat`
//! - `ChatResponse`: response body returned to clients
//! - the history cap shared by every frontend

use serde::{Deserialize, Serialize};

/// Maximum number of messages a frontend keeps per conversation.
///
/// After every exchange the history is trimmed to the most recent
/// `HISTORY_LIMIT` entries so long-running chats don't grow the request
/// body without bound.
pub const HISTORY_LIMIT: usize = 20;

/// Model used when a chat request does not name one.
pub const FALLBACK_MODEL: &str = "openai/gpt-3.5-turbo";

/// Completion token limit used when a chat request does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Sampling temperature used when a chat request does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// One message in a conversation.
///
/// `role` is the OpenAI-style speaker tag ("user", "assistant", "system");
/// it is passed through to OpenRouter verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /api/chat`.
///
/// # JSON Example
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
/// Every field except `messages` is optional and falls back to the defaults
/// above, so a minimal `{"messages": [...]}` body is a valid request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,

    #[serde(default = "default_chat_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_chat_model() -> String {
    FALLBACK_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

/// Response returned for chat operations.
///
/// # JSON Example
///
/// ```json
/// {
///   "response": "Hi! How can I help you today?",
///   "model": "openai/gpt-3.5-turbo"
/// }
/// ```
///
/// `model` is the model the upstream actually used, which may differ from
/// the one requested when OpenRouter reroutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
}

/// Trim a conversation to the most recent [`HISTORY_LIMIT`] messages.
pub fn truncate_history(history: &mut Vec<ChatMessage>) {
    if history.len() > HISTORY_LIMIT {
        let excess = history.len() - HISTORY_LIMIT;
        history.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_fills_in_defaults() {
        let request: ChatRequest = serde_json::from_value(json!({
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .unwrap();
        assert_eq!(request.model, FALLBACK_MODEL);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn chat_request_keeps_explicit_values() {
        let request: ChatRequest = serde_json::from_value(json!({
            "messages": [],
            "model": "anthropic/claude-3-haiku",
            "max_tokens": 256,
            "temperature": 0.2
        }))
        .unwrap();
        assert_eq!(request.model, "anthropic/claude-3-haiku");
        assert_eq!(request.max_tokens, 256);
        assert_eq!(request.temperature, 0.2);
    }

    #[test]
    fn truncate_keeps_the_most_recent_messages() {
        let mut history: Vec<ChatMessage> =
            (0..25).map(|i| ChatMessage::user(format!("msg {i}"))).collect();
        truncate_history(&mut history);
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].content, "msg 5");
        assert_eq!(history.last().unwrap().content, "msg 24");
    }

    #[test]
    fn truncate_leaves_short_histories_alone() {
        let mut history = vec![ChatMessage::user("only one")];
        truncate_history(&mut history);
        assert_eq!(history.len(), 1);
    }
}
