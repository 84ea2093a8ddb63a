//! Client for the companion API, shared by the frontends.
//!
//! Both the Telegram bot and the terminal client talk to the API server
//! through this type rather than to OpenRouter directly, so conversation
//! handling stays identical across frontends.

use std::time::Duration;

use crate::models::catalog::{ModelInfo, ModelList};
use crate::models::chat::{ChatMessage, ChatRequest, ChatResponse, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::services::normalize_base_url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors a frontend can hit while talking to the API server.
///
/// Frontends render these as user-visible text instead of crashing; the
/// conversation continues after a failed exchange.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("{0}")]
    InvalidBaseUrl(#[from] crate::services::InvalidBaseUrl),

    #[error("could not reach the companion API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("companion API error (status {status}): {detail}")]
    Api { status: u16, detail: String },
}

/// HTTP client bound to one API server base URL (`API_URL`).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Send a conversation to `POST /api/chat` and return the reply.
    ///
    /// The full history is posted every time; the server is stateless.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> Result<ChatResponse, ApiClientError> {
        let request = ChatRequest {
            messages: messages.to_vec(),
            model: model.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        };

        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiClientError::Api {
                status: status.as_u16(),
                detail: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch the available models from `GET /api/models`.
    pub async fn models(&self) -> Result<Vec<ModelInfo>, ApiClientError> {
        let response = self
            .http
            .get(format!("{}/api/models", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiClientError::Api {
                status: status.as_u16(),
                detail: response.text().await.unwrap_or_default(),
            });
        }

        let list: ModelList = response.json().await?;
        Ok(list.data)
    }
}
