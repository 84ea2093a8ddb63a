//! Data models shared by the API server and the frontends.
//!
//! This module contains the wire types of the public API.

/// Chat request/response types and the history cap
pub mod chat;
/// Model catalog passthrough types
pub mod catalog;
