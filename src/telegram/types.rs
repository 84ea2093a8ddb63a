//! Telegram Bot API wire types.
//!
//! A deliberately small subset: updates, messages, callback queries and
//! inline keyboards. Unknown fields are ignored by serde, so the types stay
//! stable as Telegram grows its API.

use serde::{Deserialize, Serialize};

/// Envelope every Bot API method returns.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,

    #[serde(default)]
    pub result: Option<T>,

    #[serde(default)]
    pub description: Option<String>,
}

/// One incoming update from `getUpdates`.
///
/// Exactly one of the payload fields is set per update; this bot only
/// subscribes to messages and callback queries.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,

    #[serde(default)]
    pub message: Option<Message>,

    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,

    #[serde(default)]
    pub from: Option<User>,

    pub chat: Chat,

    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// A button press on an inline keyboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,

    pub from: User,

    #[serde(default)]
    pub message: Option<Message>,

    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_text_message_update() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 7001,
                "message": {
                    "message_id": 42,
                    "from": {"id": 1234, "is_bot": false, "first_name": "A"},
                    "chat": {"id": 1234, "type": "private"},
                    "date": 1720000000,
                    "text": "hello"
                }
            }"#,
        )
        .unwrap();
        let message = update.message.unwrap();
        assert_eq!(update.update_id, 7001);
        assert_eq!(message.chat.id, 1234);
        assert_eq!(message.text.as_deref(), Some("hello"));
        assert!(update.callback_query.is_none());
    }

    #[test]
    fn parses_a_callback_query_update() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 7002,
                "callback_query": {
                    "id": "abc",
                    "from": {"id": 1234},
                    "message": {"message_id": 43, "chat": {"id": 1234}},
                    "data": "model:openai/gpt-3.5-turbo"
                }
            }"#,
        )
        .unwrap();
        let query = update.callback_query.unwrap();
        assert_eq!(query.data.as_deref(), Some("model:openai/gpt-3.5-turbo"));
        assert_eq!(query.from.id, 1234);
    }
}
