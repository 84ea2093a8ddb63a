//! OpenRouter API client.
//!
//! This module handles all traffic to the OpenRouter gateway: chat
//! completions and the model catalog. Every call carries the deployment's
//! attribution headers and runs through a bounded retry loop.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::AppError;
use crate::models::catalog::ModelList;
use crate::models::chat::ChatRequest;
use crate::services::normalize_base_url;

/// Per-request timeout. Completions on free-tier models can queue for a
/// while, so this is deliberately generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Retries after the initial attempt, for retryable failures only.
const RETRIES: u32 = 2;

/// `X-Title` attribution header sent to OpenRouter.
const ATTRIBUTION_TITLE: &str = "Personal Companion Bot";

/// Client for the OpenRouter API.
///
/// # Headers Sent
///
/// - `Authorization: Bearer <key>`
/// - `HTTP-Referer: <APP_URL>` (OpenRouter's app attribution)
/// - `X-Title: Personal Companion Bot`
///
/// The client is cheap to clone (reqwest pools connections internally) and
/// is shared with handlers as axum state.
#[derive(Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    referer: String,
}

impl OpenRouterClient {
    /// Build a client from configuration.
    ///
    /// A missing API key is NOT an error here: the deployment contract is to
    /// start with placeholder configuration and fail per request, so the gap
    /// is reported by [`chat_completion`](Self::chat_completion) instead.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let base_url = normalize_base_url(&config.openrouter_base_url)
            .map_err(|e| AppError::InvalidRequest(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.openrouter_key().map(str::to_string),
            referer: config.app_url.clone(),
        })
    }

    /// Whether an API key was configured for this deployment.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Request a chat completion.
    ///
    /// # Process
    ///
    /// 1. Fail fast with [`AppError::ApiKeyMissing`] when no key is configured
    /// 2. POST the conversation to `{base}/chat/completions`
    /// 3. Retry on network errors, 429 and 5xx (never on other 4xx)
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion, AppError> {
        let key = self.api_key.clone().ok_or(AppError::ApiKeyMissing)?;
        let url = format!("{}/chat/completions", self.base_url);

        let payload = serde_json::json!({
            "messages": request.messages,
            "model": request.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        self.send_json(|| {
            self.http
                .post(&url)
                .bearer_auth(&key)
                .header("HTTP-Referer", &self.referer)
                .header("X-Title", ATTRIBUTION_TITLE)
                .json(&payload)
        })
        .await
    }

    /// Fetch the model catalog from `{base}/models`.
    ///
    /// The response is kept as a passthrough document; see
    /// [`ModelList`](crate::models::catalog::ModelList).
    pub async fn list_models(&self) -> Result<ModelList, AppError> {
        let key = self.api_key.clone().ok_or(AppError::ApiKeyMissing)?;
        let url = format!("{}/models", self.base_url);

        self.send_json(|| {
            self.http
                .get(&url)
                .bearer_auth(&key)
                .header("HTTP-Referer", &self.referer)
                .header("X-Title", ATTRIBUTION_TITLE)
        })
        .await
    }

    /// Send a request with bounded retries and decode the JSON body.
    ///
    /// # Retry Policy
    ///
    /// - Transport errors (timeout, connect, reset): retried
    /// - 429 and 5xx statuses: retried
    /// - Other statuses and undecodable bodies: returned immediately
    ///
    /// Backoff starts at 200 ms and doubles per attempt, capped at 2 s, with
    /// a deterministic jitter derived from the attempt number.
    async fn send_json<T, F>(&self, build: F) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut delay_ms: u64 = 200;
        let mut attempt: u32 = 0;
        loop {
            let (err, retryable) = match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.json::<T>().await?);
                    }
                    let detail = response.text().await.unwrap_or_default();
                    let err = AppError::UpstreamStatus {
                        status: status.as_u16(),
                        category: categorize(status),
                        detail,
                    };
                    (err, is_retryable(status))
                }
                Err(e) => {
                    let retryable = e.is_timeout() || e.is_connect() || e.is_request();
                    (AppError::Upstream(e), retryable)
                }
            };

            if !retryable || attempt >= RETRIES {
                return Err(err);
            }
            tracing::warn!("OpenRouter call failed (attempt {}): {}", attempt + 1, err);

            // deterministic jitter: spread 0..99 ms based on attempt
            let jitter = (attempt as u64 * 37) % 100;
            tokio::time::sleep(Duration::from_millis((delay_ms + jitter).min(2000))).await;
            delay_ms = delay_ms.saturating_mul(2);
            attempt += 1;
        }
    }
}

/// Coarse classification of an upstream error status, used in logs and
/// error messages.
fn categorize(status: StatusCode) -> &'static str {
    match status {
        StatusCode::TOO_MANY_REQUESTS => "rate_limit",
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => "invalid_request",
        _ if status.is_server_error() => "upstream_error",
        _ => "request_error",
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Chat completion document returned by OpenRouter.
///
/// Only the fields this service reads are modeled; everything is defaulted
/// so a sparse upstream answer still decodes.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,

    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: CompletionMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Content of the first choice, or an empty string when the upstream
    /// returned no usable choice.
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_regular_completion() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "id": "gen-123",
            "model": "openai/gpt-3.5-turbo",
            "choices": [
                {"message": {"role": "assistant", "content": "Hello there."}}
            ],
            "usage": {"total_tokens": 12}
        }))
        .unwrap();
        assert_eq!(completion.first_content(), "Hello there.");
        assert_eq!(completion.model.as_deref(), Some("openai/gpt-3.5-turbo"));
    }

    #[test]
    fn empty_choices_yield_empty_content() {
        let completion: ChatCompletion = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(completion.first_content(), "");
        assert!(completion.model.is_none());
    }

    #[test]
    fn rate_limits_and_server_errors_are_retryable() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn statuses_are_categorized() {
        assert_eq!(categorize(StatusCode::TOO_MANY_REQUESTS), "rate_limit");
        assert_eq!(categorize(StatusCode::UNPROCESSABLE_ENTITY), "invalid_request");
        assert_eq!(categorize(StatusCode::INTERNAL_SERVER_ERROR), "upstream_error");
        assert_eq!(categorize(StatusCode::UNAUTHORIZED), "request_error");
    }
}
