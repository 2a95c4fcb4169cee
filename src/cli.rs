// src/cli.rs
// =============================================================================
// This file defines the bot's command-line interface using the `clap` crate.
//
// Every option can also be given through an environment variable (the `env`
// attribute), so the bot can be started with nothing but a .env file:
//
//   BOT_TOKEN=123:abc GITHUB_TOKEN=ghp_xxx gh-search-bot
//
// The parsed Cli is converted into a validated Config (see config.rs) before
// anything else uses it.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;

// This struct represents all the options the bot accepts
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "gh-search-bot",
    version = "0.1.0",
    about = "A Telegram bot to search GitHub repositories",
    long_about = "gh-search-bot answers /search <query> with GitHub repositories ranked by stars. \
                  Results are paginated with inline buttons and each repository offers a README preview."
)]
pub struct Cli {
    /// Telegram bot token issued by @BotFather
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Optional GitHub token, raises the API rate limit when set
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Number of repositories shown per page (1-100)
    #[arg(long, env = "RESULTS_PER_PAGE", default_value_t = 5)]
    pub page_size: u32,

    /// Timeout for each GitHub request, in seconds
    #[arg(long, env = "GITHUB_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Base URL of the Telegram Bot API
    #[arg(long, env = "TELEGRAM_API_URL", default_value = "https://api.telegram.org")]
    pub telegram_api_url: String,

    /// How long a single getUpdates long poll may wait, in seconds
    #[arg(long, env = "POLL_TIMEOUT_SECS", default_value_t = 30)]
    pub poll_timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set (e.g. "info", "gh_search_bot=debug")
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `env = "..."` do?
//    - If the flag is not on the command line, clap reads the variable
//    - The command line still wins when both are present
//    - It needs clap's "env" feature (see Cargo.toml)
//
// 2. Why Option<String> for github_token?
//    - The option is not required, clap gives us None when it's missing
//    - A plain String field would make clap demand it
//
// 3. What is hide_env_values?
//    - Keeps secret values out of the --help output
// -----------------------------------------------------------------------------
