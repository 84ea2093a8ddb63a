//! Telegram frontend.
//!
//! A small hand-rolled binding to the Telegram Bot HTTP API (long polling
//! via `getUpdates`) plus the companion bot built on top of it. Only the
//! methods and fields this bot uses are modeled.

/// Bot API transport
pub mod api;
/// The companion bot loop and command handling
pub mod bot;
/// Bot API wire types
pub mod types;
