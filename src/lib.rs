//! Personal companion bot.
//!
//! A small AI chat service built around the OpenRouter API. The crate ships
//! three binaries that share this library:
//!
//! - `companion-bot`: the HTTP API server (the process the container runs)
//! - `telegram_bot`: a Telegram frontend polling the Bot API
//! - `terminal_client`: an interactive terminal frontend
//!
//! The server is stateless: conversation history lives in the frontends and
//! is sent in full with every chat request.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod telegram;
