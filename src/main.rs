// src/main.rs
// =============================================================================
// Entry point of the GitHub search bot.
//
// What happens here:
// 1. Load an optional .env file and parse options with clap
// 2. Install the tracing subscriber (RUST_LOG or --log-level)
// 3. Build the validated Config and the GitHub + Telegram clients
// 4. Check the bot token with getMe, then poll for updates until Ctrl-C
// 5. Exit with code 0 on a clean shutdown, 1 on a startup error
// =============================================================================

// Module declarations - tells Rust about our other source files
mod bot; // src/bot/ - commands, tokens, rendering, routing
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - validated runtime configuration
mod error; // src/error.rs - typed errors
mod github; // src/github/ - GitHub search and README clients
mod telegram; // src/telegram/ - Telegram Bot API adapter

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use bot::{Renderer, Router};
use cli::Cli;
use config::Config;
use github::{HttpContentClient, HttpSearchClient};
use telegram::TelegramClient;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    // A missing .env is fine, the environment may already be set
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => debug!("no .env file"),
        Err(e) => warn!(error = %e, "could not read .env"),
    }

    let config = Config::try_from(cli)?;
    info!(
        page_size = config.page_size,
        timeout_secs = config.timeout.as_secs(),
        github_api = %config.github_api_url,
        "starting gh-search-bot"
    );
    if config.github_token.is_none() {
        warn!("GITHUB_TOKEN is not set, unauthenticated GitHub rate limits apply");
    }

    let http = github::build_http_client(&config)?;
    let search = Arc::new(HttpSearchClient::new(
        http.clone(),
        config.github_api_url.clone(),
        config.github_token.clone(),
    ));
    let content = Arc::new(HttpContentClient::new(
        http,
        config.github_api_url.clone(),
        config.github_token.clone(),
    ));

    let telegram = Arc::new(TelegramClient::new(&config)?);
    let me = telegram
        .get_me()
        .await
        .context("could not reach the Telegram Bot API (check BOT_TOKEN)")?;
    info!(
        bot_id = me.id,
        username = me.username.as_deref().unwrap_or("<none>"),
        "connected to Telegram"
    );

    let router = Arc::new(Router::new(
        search,
        content,
        telegram.clone(),
        Renderer::new(config.page_size),
    ));

    telegram::run_polling(telegram, router).await
}

// Installs the global fmt subscriber
//
// RUST_LOG takes precedence; otherwise `default_filter` (from --log-level)
fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("invalid log filter '{}'", default_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
