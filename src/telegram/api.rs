//! Telegram Bot API transport.
//!
//! Thin reqwest wrapper around the handful of Bot API methods the
//! companion bot needs. Every method POSTs JSON to
//! `https://api.telegram.org/bot<token>/<method>` and unwraps the standard
//! `{ok, result, description}` envelope.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::telegram::types::{ApiResponse, InlineKeyboardMarkup, Message, Update};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Seconds the server holds a `getUpdates` call open.
pub const POLL_TIMEOUT_SECS: u64 = 30;

/// The HTTP client timeout must outlive the long-poll hold.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(POLL_TIMEOUT_SECS + 30);

/// Errors from the Bot API transport.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("Telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `ok: false`; the string is Telegram's
    /// description of what went wrong.
    #[error("Telegram API rejected the call: {0}")]
    Api(String),
}

/// Client bound to one bot token.
#[derive(Clone)]
pub struct BotApi {
    http: reqwest::Client,
    base: String,
}

impl BotApi {
    pub fn new(token: &str) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base: format!("{TELEGRAM_API_BASE}/bot{token}"),
        })
    }

    /// Call one Bot API method and unwrap its envelope.
    async fn call<T, P>(&self, method: &str, payload: &P) -> Result<T, TelegramError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(format!("{}/{}", self.base, method))
            .json(payload)
            .send()
            .await?;

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.ok {
            return Err(TelegramError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| format!("{method} failed")),
            ));
        }
        envelope
            .result
            .ok_or_else(|| TelegramError::Api(format!("{method}: empty result")))
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            &serde_json::json!({
                "offset": offset,
                "timeout": POLL_TIMEOUT_SECS,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, TelegramError> {
        self.call(
            "sendMessage",
            &serde_json::json!({"chat_id": chat_id, "text": text}),
        )
        .await
    }

    /// Send a message rendered with Telegram's Markdown parse mode.
    pub async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<Message, TelegramError> {
        self.call(
            "sendMessage",
            &serde_json::json!({"chat_id": chat_id, "text": text, "parse_mode": "Markdown"}),
        )
        .await
    }

    pub async fn send_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        markup: &InlineKeyboardMarkup,
    ) -> Result<Message, TelegramError> {
        self.call(
            "sendMessage",
            &serde_json::json!({"chat_id": chat_id, "text": text, "reply_markup": markup}),
        )
        .await
    }

    /// Show a chat action ("typing") while the reply is being produced.
    pub async fn send_chat_action(&self, chat_id: i64, action: &str) -> Result<bool, TelegramError> {
        self.call(
            "sendChatAction",
            &serde_json::json!({"chat_id": chat_id, "action": action}),
        )
        .await
    }

    /// Acknowledge a callback query so the client stops its spinner.
    pub async fn answer_callback_query(&self, callback_id: &str) -> Result<bool, TelegramError> {
        self.call(
            "answerCallbackQuery",
            &serde_json::json!({"callback_query_id": callback_id}),
        )
        .await
    }

    /// Replace the text of a message the bot sent earlier.
    ///
    /// Telegram returns either the edited message or `true` depending on
    /// message origin, so the result is left untyped.
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<serde_json::Value, TelegramError> {
        self.call(
            "editMessageText",
            &serde_json::json!({"chat_id": chat_id, "message_id": message_id, "text": text}),
        )
        .await
    }
}
