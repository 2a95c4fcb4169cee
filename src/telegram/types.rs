// src/telegram/types.rs
// =============================================================================
// Telegram Bot API wire types.
//
// Only the fields the bot reads or writes are modelled; serde ignores the
// rest of each JSON object. Incoming updates are converted to the
// platform-neutral bot::Incoming, outgoing keyboards come from bot::Keyboard.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::bot::{ButtonAction, Incoming, Interaction, Keyboard, MessageRef, ParseMode};

// Every Bot API response is wrapped in this envelope
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

impl Message {
    pub fn reference(&self) -> MessageRef {
        MessageRef {
            chat_id: self.chat.id,
            message_id: self.message_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    // Returns None for updates the bot doesn't handle (stickers, edits, ...)
    pub fn into_incoming(self) -> Option<Incoming> {
        if let Some(query) = self.callback_query {
            return Some(Incoming::Interaction(Interaction {
                id: query.id,
                message: query.message.as_ref().map(Message::reference),
                data: query.data.unwrap_or_default(),
            }));
        }

        let message = self.message?;
        let text = message.text?;
        Some(Incoming::Text {
            chat_id: message.chat.id,
            private: message.chat.kind == "private",
            text,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl From<&Keyboard> for InlineKeyboardMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        let inline_keyboard = keyboard
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| {
                        let (url, callback_data) = match &button.action {
                            ButtonAction::Url(url) => (Some(url.clone()), None),
                            ButtonAction::Callback(token) => (None, Some(token.clone())),
                        };
                        InlineKeyboardButton {
                            text: button.label.clone(),
                            url,
                            callback_data,
                        }
                    })
                    .collect()
            })
            .collect();

        InlineKeyboardMarkup { inline_keyboard }
    }
}

pub fn parse_mode_name(mode: ParseMode) -> &'static str {
    match mode {
        ParseMode::Html => "HTML",
        ParseMode::Markdown => "Markdown",
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub disable_web_page_preview: bool,
}

#[derive(Debug, Serialize)]
pub struct EditMessageTextRequest<'a> {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub disable_web_page_preview: bool,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQueryRequest<'a> {
    pub callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    pub show_alert: bool,
}
