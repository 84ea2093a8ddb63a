//! The companion bot: command handling and the polling loop.
//!
//! # Commands
//!
//! - `/start` - greet and reset the conversation
//! - `/clear` - reset the conversation history
//! - `/model` - pick a model from an inline keyboard
//! - any other text - chat with the model
//!
//! Conversation context is kept in memory per Telegram user and capped at
//! the shared history limit; the bot posts the full context to the
//! companion API on every message.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::models::catalog::ModelInfo;
use crate::models::chat::{ChatMessage, truncate_history};
use crate::services::api_client::ApiClient;
use crate::telegram::api::{BotApi, TelegramError};
use crate::telegram::types::{
    CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update,
};

/// Callback data prefix for model selection buttons.
const MODEL_CALLBACK_PREFIX: &str = "model:";

/// Buttons per keyboard row.
const KEYBOARD_COLUMNS: usize = 2;

const GREETING: &str = "Hi! I am your personal companion bot powered by the OpenRouter API. \
Ask me anything and I will do my best to help.\n\n\
Use /model to pick an AI model.\n\n\
Use /clear to reset the conversation history.";

/// Per-user conversation state.
#[derive(Debug, Default)]
struct Session {
    history: Vec<ChatMessage>,
    model: Option<String>,
}

/// The bot itself: Telegram transport, companion API client and sessions.
pub struct CompanionBot {
    api: BotApi,
    backend: ApiClient,
    default_model: String,
    sessions: Mutex<HashMap<i64, Session>>,
}

impl CompanionBot {
    pub fn new(api: BotApi, backend: ApiClient, default_model: String) -> Self {
        Self {
            api,
            backend,
            default_model,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Poll for updates forever.
    ///
    /// # Error Handling
    ///
    /// - A failed poll is logged and retried after a short pause
    /// - A failed update is logged and answered with a generic apology;
    ///   the loop moves on to the next update either way
    pub async fn run(&self) -> Result<(), TelegramError> {
        tracing::info!("Telegram bot started, polling for updates");
        let mut offset = 0i64;
        loop {
            let updates = match self.api.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::error!("Polling for updates failed: {e}");
                    tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                self.handle_update(update).await;
            }
        }
    }

    async fn handle_update(&self, update: Update) {
        if let Some(message) = update.message {
            let chat_id = message.chat.id;
            if let Err(e) = self.handle_message(&message).await {
                tracing::error!("Update {} caused error: {e}", update.update_id);
                if let Err(e) = self
                    .api
                    .send_message(chat_id, "Something went wrong while handling your request.")
                    .await
                {
                    tracing::error!("Could not deliver the error notice: {e}");
                }
            }
        } else if let Some(query) = update.callback_query {
            if let Err(e) = self.handle_callback(&query).await {
                tracing::error!("Callback {} caused error: {e}", query.id);
            }
        }
    }

    async fn handle_message(&self, message: &Message) -> Result<(), TelegramError> {
        let Some(text) = message.text.as_deref() else {
            // Stickers, photos and the like; nothing to do.
            return Ok(());
        };
        let chat_id = message.chat.id;
        let user_id = message.from.as_ref().map(|u| u.id).unwrap_or(chat_id);

        match text.trim() {
            "/start" => self.on_start(chat_id, user_id).await,
            "/clear" => self.on_clear(chat_id, user_id).await,
            "/model" => self.on_model(chat_id).await,
            text => self.on_chat(chat_id, user_id, text).await,
        }
    }

    async fn on_start(&self, chat_id: i64, user_id: i64) -> Result<(), TelegramError> {
        // Resets the conversation; a previously chosen model is kept.
        self.sessions
            .lock()
            .await
            .entry(user_id)
            .or_default()
            .history
            .clear();
        self.api.send_message(chat_id, GREETING).await?;
        Ok(())
    }

    async fn on_clear(&self, chat_id: i64, user_id: i64) -> Result<(), TelegramError> {
        if let Some(session) = self.sessions.lock().await.get_mut(&user_id) {
            session.history.clear();
        }
        self.api
            .send_message(chat_id, "Conversation history cleared.")
            .await?;
        Ok(())
    }

    async fn on_model(&self, chat_id: i64) -> Result<(), TelegramError> {
        let models = match self.backend.models().await {
            Ok(models) => models,
            Err(e) => {
                tracing::error!("Could not fetch the model list: {e}");
                Vec::new()
            }
        };

        if models.is_empty() {
            self.api
                .send_message(
                    chat_id,
                    "Could not fetch the model list. The default model stays in use.",
                )
                .await?;
            return Ok(());
        }

        let keyboard = model_keyboard(&models);
        self.api
            .send_keyboard(chat_id, "Choose a model:", &keyboard)
            .await?;
        Ok(())
    }

    async fn handle_callback(&self, query: &CallbackQuery) -> Result<(), TelegramError> {
        let Some(model_id) = query
            .data
            .as_deref()
            .and_then(|data| data.strip_prefix(MODEL_CALLBACK_PREFIX))
        else {
            return Ok(());
        };

        {
            let mut sessions = self.sessions.lock().await;
            sessions.entry(query.from.id).or_default().model = Some(model_id.to_string());
        }

        self.api.answer_callback_query(&query.id).await?;
        if let Some(message) = &query.message {
            self.api
                .edit_message_text(
                    message.chat.id,
                    message.message_id,
                    &format!("Model selected: {model_id}"),
                )
                .await?;
        }
        Ok(())
    }

    async fn on_chat(&self, chat_id: i64, user_id: i64, text: &str) -> Result<(), TelegramError> {
        // Append the user's message and snapshot the conversation while the
        // lock is held; the API call happens without it.
        let (history, model) = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.entry(user_id).or_default();
            session.history.push(ChatMessage::user(text));
            let model = session
                .model
                .clone()
                .unwrap_or_else(|| self.default_model.clone());
            (session.history.clone(), model)
        };

        if let Err(e) = self.api.send_chat_action(chat_id, "typing").await {
            tracing::debug!("Chat action failed: {e}");
        }

        let (reply, model_used) = match self.backend.chat(&history, &model).await {
            Ok(response) => (response.response, response.model),
            Err(e) => (format!("API error: {e}"), model),
        };

        {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.entry(user_id).or_default();
            session.history.push(ChatMessage::assistant(&reply));
            truncate_history(&mut session.history);
        }

        self.api
            .send_markdown(chat_id, &format!("{reply}\n\n_Model: {model_used}_"))
            .await?;
        Ok(())
    }
}

/// Lay the model list out as an inline keyboard, two buttons per row.
fn model_keyboard(models: &[ModelInfo]) -> InlineKeyboardMarkup {
    let inline_keyboard = models
        .chunks(KEYBOARD_COLUMNS)
        .map(|row| {
            row.iter()
                .map(|model| InlineKeyboardButton {
                    text: model.display_name().to_string(),
                    callback_data: format!("{MODEL_CALLBACK_PREFIX}{}", model.id),
                })
                .collect()
        })
        .collect();
    InlineKeyboardMarkup { inline_keyboard }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(id: &str, name: Option<&str>) -> ModelInfo {
        serde_json::from_value(match name {
            Some(name) => json!({"id": id, "name": name}),
            None => json!({"id": id}),
        })
        .unwrap()
    }

    #[test]
    fn keyboard_has_two_buttons_per_row() {
        let models = vec![
            model("a/one", Some("One")),
            model("b/two", Some("Two")),
            model("c/three", None),
        ];
        let keyboard = model_keyboard(&models);
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
        // odd tail gets its own row
        assert_eq!(keyboard.inline_keyboard[1].len(), 1);
        assert_eq!(keyboard.inline_keyboard[1][0].text, "c/three");
    }

    #[test]
    fn keyboard_buttons_carry_the_callback_prefix() {
        let keyboard = model_keyboard(&[model("a/one", Some("One"))]);
        assert_eq!(keyboard.inline_keyboard[0][0].callback_data, "model:a/one");
    }

    #[test]
    fn callback_prefix_round_trips() {
        let data = format!("{MODEL_CALLBACK_PREFIX}openai/gpt-3.5-turbo");
        assert_eq!(
            data.strip_prefix(MODEL_CALLBACK_PREFIX),
            Some("openai/gpt-3.5-turbo")
        );
    }
}
