// src/telegram/mod.rs
// =============================================================================
// Telegram adapter: implements bot::ChatPlatform over the Bot API and runs
// the long-polling update loop.
//
// Submodules:
// - client: Bot API calls (getMe, getUpdates, sendMessage, ...)
// - poller: the update loop that feeds the Router
// - types: JSON shapes of the Bot API
// =============================================================================

mod client;
mod poller;
mod types;

pub use client::TelegramClient;
pub use poller::run_polling;
