//! Companion Bot API - Main Application Entry Point
//!
//! This is the HTTP API server of the personal companion bot. It proxies
//! chat completions and model listings to the OpenRouter API for the
//! Telegram and terminal frontends.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Upstream**: OpenRouter chat-completions API via reqwest
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the OpenRouter client
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port (8000 by default, the port the
//!    container image exposes)

use tracing_subscriber::EnvFilter;

use companion_bot::{config::Config, handlers, services::openrouter::OpenRouterClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");
    if config.openrouter_key().is_none() {
        tracing::warn!(
            "OPENROUTER_API_KEY is not set; chat requests will fail until it is supplied"
        );
    }

    // Build the OpenRouter client shared by all handlers via State extraction
    let router_client = OpenRouterClient::new(&config)?;

    let app = handlers::app(router_client);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
