// src/telegram/client.rs
// =============================================================================
// HTTP client for the Telegram Bot API.
//
// All methods are POST {api}/bot<token>/<method> with a JSON body. The API
// answers { "ok": true, "result": ... } or { "ok": false, "description": ... };
// ok == false becomes PlatformError::Rejected so the router can fall back
// (edit -> new message, Markdown -> plain text).
//
// The URL contains the bot token, so it is never logged.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::types::{
    parse_mode_name, AnswerCallbackQueryRequest, ApiResponse, EditMessageTextRequest,
    GetUpdatesRequest, InlineKeyboardMarkup, Message, SendMessageRequest, Update, User,
};
use crate::bot::{Acknowledgement, ChatPlatform, MessageRef, OutgoingMessage};
use crate::config::Config;
use crate::error::PlatformError;

// Extra time on top of the long-poll timeout before the HTTP request gives up
const POLL_GRACE: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    http: Client,
    method_base: String,
    poll_timeout: Duration,
}

impl TelegramClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build Telegram HTTP client")?;

        Ok(Self {
            http,
            method_base: format!("{}/bot{}", config.telegram_api_url, config.bot_token),
            poll_timeout: config.poll_timeout,
        })
    }

    /// Identifies the bot; fails fast on a bad token.
    pub async fn get_me(&self) -> Result<User, PlatformError> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    /// Long-polls for updates with id >= `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, PlatformError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout.as_secs(),
            allowed_updates: vec!["message", "callback_query"],
        };
        self.call("getUpdates", &request, Some(self.poll_timeout + POLL_GRACE))
            .await
    }

    async fn call<B, T>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, PlatformError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.method_base, method);

        let mut request = self.http.post(&url).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| "no description".to_string());
            debug!(method, description = %description, "Bot API refused request");
            return Err(PlatformError::Rejected { description });
        }

        envelope
            .result
            .ok_or_else(|| PlatformError::Transport(format!("{} returned no result", method)))
    }
}

#[async_trait]
impl ChatPlatform for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        message: &OutgoingMessage,
    ) -> Result<MessageRef, PlatformError> {
        let request = SendMessageRequest {
            chat_id,
            text: &message.text,
            parse_mode: message.parse_mode.map(parse_mode_name),
            reply_markup: message.keyboard.as_ref().map(InlineKeyboardMarkup::from),
            disable_web_page_preview: message.disable_web_page_preview,
        };

        let sent: Message = self.call("sendMessage", &request, None).await?;
        Ok(sent.reference())
    }

    async fn edit_message(
        &self,
        target: MessageRef,
        message: &OutgoingMessage,
    ) -> Result<(), PlatformError> {
        let request = EditMessageTextRequest {
            chat_id: target.chat_id,
            message_id: target.message_id,
            text: &message.text,
            parse_mode: message.parse_mode.map(parse_mode_name),
            reply_markup: message.keyboard.as_ref().map(InlineKeyboardMarkup::from),
            disable_web_page_preview: message.disable_web_page_preview,
        };

        // Result is the edited Message (or `true` for inline messages)
        let _: serde_json::Value = self.call("editMessageText", &request, None).await?;
        Ok(())
    }

    async fn answer_interaction(
        &self,
        interaction_id: &str,
        ack: &Acknowledgement,
    ) -> Result<(), PlatformError> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id: interaction_id,
            text: ack.text.as_deref(),
            show_alert: ack.show_alert,
        };

        let _: bool = self.call("answerCallbackQuery", &request, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn config(api: &str) -> Config {
        let cli = Cli::try_parse_from([
            "gh-search-bot",
            "--bot-token",
            "123:abc",
            "--telegram-api-url",
            api,
            "--timeout-secs",
            "2",
        ])
        .unwrap();
        Config::try_from(cli).unwrap()
    }

    #[test]
    fn test_method_base_contains_token() {
        let client = TelegramClient::new(&config("https://api.telegram.org")).unwrap();
        assert_eq!(client.method_base, "https://api.telegram.org/bot123:abc");
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        let client = TelegramClient::new(&config("http://127.0.0.1:9")).unwrap();
        let err = client.get_me().await.unwrap_err();

        assert!(matches!(err, PlatformError::Transport(_)));
        assert!(!err.to_string().contains("123:abc"));
    }
}
