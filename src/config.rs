// src/config.rs
// =============================================================================
// The validated runtime configuration.
//
// Config is built once at startup from the parsed Cli and then handed to the
// components that need it (GitHub clients, renderer, Telegram adapter).
// Nothing reads environment variables after this point.
// =============================================================================

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use url::Url;

use crate::cli::Cli;

/// Largest `per_page` value the GitHub search API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub github_token: Option<String>,
    pub page_size: u32,
    pub timeout: Duration,
    pub github_api_url: String,
    pub telegram_api_url: String,
    pub poll_timeout: Duration,
}

impl TryFrom<Cli> for Config {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.bot_token.trim().is_empty() {
            return Err(anyhow!("BOT_TOKEN must not be empty"));
        }

        if cli.page_size == 0 || cli.page_size > MAX_PAGE_SIZE {
            return Err(anyhow!(
                "page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                cli.page_size
            ));
        }

        if cli.timeout_secs == 0 {
            return Err(anyhow!("timeout must be at least one second"));
        }

        // An empty GITHUB_TOKEN= line in .env means "no token"
        let github_token = cli
            .github_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Config {
            bot_token: cli.bot_token.trim().to_string(),
            github_token,
            page_size: cli.page_size,
            timeout: Duration::from_secs(cli.timeout_secs),
            github_api_url: normalize_base_url(&cli.github_api_url)?,
            telegram_api_url: normalize_base_url(&cli.telegram_api_url)?,
            poll_timeout: Duration::from_secs(cli.poll_timeout_secs),
        })
    }
}

// Validates a base URL and strips the trailing slash so paths can be appended
// with format!("{}/path", base)
fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).with_context(|| format!("invalid base URL '{}'", raw))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!("base URL must be http(s): {}", raw));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
