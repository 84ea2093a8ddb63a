//! Telegram frontend entry point.
//!
//! Requires `TELEGRAM_TOKEN`; talks to the companion API at `API_URL`.

use tracing_subscriber::EnvFilter;

use companion_bot::{
    config::Config, services::api_client::ApiClient, telegram::api::BotApi,
    telegram::bot::CompanionBot,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let Some(token) = config.bot_token() else {
        anyhow::bail!("TELEGRAM_TOKEN is not set");
    };

    let api = BotApi::new(token)?;
    let backend = ApiClient::new(&config.api_url)?;
    tracing::info!("Using companion API at {}", config.api_url);

    let bot = CompanionBot::new(api, backend, config.default_model.clone());
    bot.run().await?;

    Ok(())
}
