//! Terminal frontend: an interactive chat session against the companion API.
//!
//! Commands mirror the Telegram bot: `/help`, `/clear`, `/models`,
//! `/model <id>`, `/exit`. Anything else is sent as a chat message.

use std::io::Write as _;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use companion_bot::{
    config::Config,
    models::chat::{ChatMessage, truncate_history},
    services::api_client::ApiClient,
};

#[derive(Parser, Debug)]
#[command(
    name = "terminal-client",
    about = "Terminal client for the personal companion bot"
)]
struct Cli {
    /// Model id to use for the session (defaults to DEFAULT_MODEL)
    #[arg(long)]
    model: Option<String>,
}

/// One line of user input, classified.
#[derive(Debug, PartialEq)]
enum ReplCommand<'a> {
    Help,
    Clear,
    Models,
    Model(&'a str),
    Exit,
    Say(&'a str),
}

impl<'a> ReplCommand<'a> {
    /// Classify a line. Returns `None` for blank input.
    ///
    /// A bare `/model` (without an argument) is intentionally NOT a command;
    /// it falls through to chat like any other text.
    fn parse(input: &'a str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lower = trimmed.to_ascii_lowercase();
        Some(match lower.as_str() {
            "/exit" => Self::Exit,
            "/help" => Self::Help,
            "/clear" => Self::Clear,
            "/models" => Self::Models,
            _ if lower.starts_with("/model ") => Self::Model(trimmed[7..].trim()),
            _ => Self::Say(trimmed),
        })
    }
}

fn show_welcome(model: &str) {
    println!("{}", "=".repeat(50));
    println!("Personal companion bot (terminal client)");
    println!("{}", "=".repeat(50));
    println!("Commands:");
    println!("/help - show this help");
    println!("/clear - reset the conversation history");
    println!("/models - list the available models");
    println!("/model <id> - switch to a model");
    println!("/exit - quit");
    println!("{}", "-".repeat(50));
    println!("Using model: {model}\n");
}

fn show_help() {
    println!("\nAvailable commands:");
    println!("/help - show this help");
    println!("/clear - reset the conversation history");
    println!("/models - list the available models");
    println!("/model <id> - switch to a model (e.g. /model openai/gpt-3.5-turbo)");
    println!("/exit - quit");
}

async fn list_models(client: &ApiClient) {
    println!("\nFetching the available models...");
    let models = match client.models().await {
        Ok(models) => models,
        Err(e) => {
            println!("Could not fetch the model list: {e}");
            return;
        }
    };
    if models.is_empty() {
        println!("The model list is empty.");
        return;
    }

    println!("\nAvailable models:");
    for (i, model) in models.iter().enumerate() {
        let context = model
            .context_length
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{}. {} (ID: {}, Context: {})",
            i + 1,
            model.display_name(),
            model.id,
            context
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let client = ApiClient::new(&config.api_url)?;

    let mut current_model = cli.model.unwrap_or_else(|| config.default_model.clone());
    let mut history: Vec<ChatMessage> = Vec::new();

    show_welcome(&current_model);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            // stdin closed
            println!("\nGoodbye!");
            break;
        };

        let Some(command) = ReplCommand::parse(&line) else {
            continue;
        };

        match command {
            ReplCommand::Exit => {
                println!("\nGoodbye!");
                break;
            }
            ReplCommand::Help => show_help(),
            ReplCommand::Clear => {
                history.clear();
                println!("\nConversation history cleared.");
            }
            ReplCommand::Models => list_models(&client).await,
            ReplCommand::Model(id) => {
                if id.is_empty() {
                    println!("\nProvide a model id, e.g. /model openai/gpt-3.5-turbo");
                } else {
                    current_model = id.to_string();
                    println!("\nModel switched to: {current_model}");
                }
            }
            ReplCommand::Say(text) => {
                history.push(ChatMessage::user(text));
                println!("\nWaiting for a reply...");

                let (reply, model_used) = match client.chat(&history, &current_model).await {
                    Ok(response) => (response.response, response.model),
                    Err(e) => (format!("API error: {e}"), current_model.clone()),
                };

                history.push(ChatMessage::assistant(&reply));
                truncate_history(&mut history);

                println!("\n[{model_used}]:\n{reply}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse() {
        assert_eq!(ReplCommand::parse("/exit"), Some(ReplCommand::Exit));
        assert_eq!(ReplCommand::parse("/HELP"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse(" /clear "), Some(ReplCommand::Clear));
        assert_eq!(ReplCommand::parse("/models"), Some(ReplCommand::Models));
        assert_eq!(
            ReplCommand::parse("/model openai/gpt-3.5-turbo"),
            Some(ReplCommand::Model("openai/gpt-3.5-turbo"))
        );
    }

    #[test]
    fn blank_input_is_skipped() {
        assert_eq!(ReplCommand::parse(""), None);
        assert_eq!(ReplCommand::parse("   "), None);
    }

    #[test]
    fn bare_model_command_is_chat() {
        // Matches the command table: only "/model <id>" switches models.
        assert_eq!(ReplCommand::parse("/model"), Some(ReplCommand::Say("/model")));
        assert_eq!(
            ReplCommand::parse("/model   "),
            Some(ReplCommand::Say("/model"))
        );
    }

    #[test]
    fn plain_text_is_chat() {
        assert_eq!(
            ReplCommand::parse("what is rust?"),
            Some(ReplCommand::Say("what is rust?"))
        );
    }
}
