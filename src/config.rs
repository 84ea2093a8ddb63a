//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `OPENROUTER_API_KEY` (optional): key for the OpenRouter API. The server
///   starts without it; chat requests fail with 500 until it is supplied.
/// - `APP_URL` (optional): public URL of this deployment, sent upstream as
///   the `HTTP-Referer` attribution header. Defaults to `http://localhost:8000`.
/// - `TELEGRAM_TOKEN` (optional): bot token, required only by the Telegram
///   frontend binary.
/// - `API_URL` (optional): base URL the frontends call, defaults to
///   `http://localhost:8000`.
/// - `DEFAULT_MODEL` (optional): model id the frontends start with.
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 8000.
/// - `OPENROUTER_BASE_URL` (optional): upstream API root, overridable for
///   testing against a local stand-in.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub openrouter_api_key: Option<String>,

    #[serde(default = "default_local_url")]
    pub app_url: String,

    pub telegram_token: Option<String>,

    #[serde(default = "default_local_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub default_model: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_openrouter_base_url")]
    pub openrouter_base_url: String,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    8000
}

fn default_local_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_model() -> String {
    "qwen/qwen-2.5-coder-32b-instruct:free".to_string()
}

fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config
    /// struct. Container deployments declare the variables with empty
    /// placeholder values, so empty strings are normalized to the same
    /// defaults as unset variables.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values cannot be parsed into
    /// expected types (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: api_url -> API_URL
        let mut config = envy::from_env::<Config>()?;
        config.normalize();
        Ok(config)
    }

    /// Treat empty placeholder values as unset.
    fn normalize(&mut self) {
        if self.app_url.trim().is_empty() {
            self.app_url = default_local_url();
        }
        if self.api_url.trim().is_empty() {
            self.api_url = default_local_url();
        }
        if self.default_model.trim().is_empty() {
            self.default_model = default_model();
        }
        if self.openrouter_base_url.trim().is_empty() {
            self.openrouter_base_url = default_openrouter_base_url();
        }
        if matches!(&self.openrouter_api_key, Some(key) if key.trim().is_empty()) {
            self.openrouter_api_key = None;
        }
        if matches!(&self.telegram_token, Some(token) if token.trim().is_empty()) {
            self.telegram_token = None;
        }
    }

    /// The OpenRouter API key, if one was actually supplied.
    pub fn openrouter_key(&self) -> Option<&str> {
        self.openrouter_api_key.as_deref()
    }

    /// The Telegram bot token, if one was actually supplied.
    pub fn bot_token(&self) -> Option<&str> {
        self.telegram_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let iter = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()));
        let mut config: Config = envy::from_iter(iter).unwrap();
        config.normalize();
        config
    }

    #[test]
    fn defaults_match_deployment_contract() {
        let config = from_pairs(&[]);
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.app_url, "http://localhost:8000");
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.default_model, "qwen/qwen-2.5-coder-32b-instruct:free");
        assert_eq!(config.openrouter_base_url, "https://openrouter.ai/api/v1");
        assert!(config.openrouter_key().is_none());
        assert!(config.bot_token().is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = from_pairs(&[
            ("OPENROUTER_API_KEY", "sk-or-test"),
            ("SERVER_PORT", "9100"),
            ("API_URL", "http://api.internal:8000"),
        ]);
        assert_eq!(config.openrouter_key(), Some("sk-or-test"));
        assert_eq!(config.server_port, 9100);
        assert_eq!(config.api_url, "http://api.internal:8000");
    }

    #[test]
    fn empty_placeholders_behave_like_unset() {
        // Container images declare the variables with empty values.
        let config = from_pairs(&[
            ("OPENROUTER_API_KEY", ""),
            ("TELEGRAM_TOKEN", ""),
            ("APP_URL", ""),
            ("API_URL", ""),
        ]);
        assert!(config.openrouter_key().is_none());
        assert!(config.bot_token().is_none());
        assert_eq!(config.app_url, "http://localhost:8000");
        assert_eq!(config.api_url, "http://localhost:8000");
    }
}
