// src/bot/platform.rs
// =============================================================================
// The chat platform as seen by the bot logic.
//
// The router never talks to Telegram directly. It builds OutgoingMessages and
// Acknowledgements and hands them to a ChatPlatform. The Telegram adapter
// (src/telegram/) implements this trait, the router tests use a fake.
//
// Rust concepts:
// - Traits: a shared interface with several implementations
// - async-trait: lets trait methods be async
// =============================================================================

use async_trait::async_trait;

use crate::error::PlatformError;

// Markup dialect the platform should use to render a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Html,
    Markdown,
}

// What happens when a button is tapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Opens a URL in the user's browser
    Url(String),
    /// Sends the token back to the bot as an interaction
    Callback(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn url(label: &str, url: &str) -> Self {
        Button {
            label: label.to_string(),
            action: ButtonAction::Url(url.to_string()),
        }
    }

    pub fn callback(label: &str, token: String) -> Self {
        Button {
            label: label.to_string(),
            action: ButtonAction::Callback(token),
        }
    }

    /// The callback token, if this button carries one
    pub fn token(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Callback(token) => Some(token),
            ButtonAction::Url(_) => None,
        }
    }
}

// Rows of inline buttons under a message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<Keyboard>,
    pub disable_web_page_preview: bool,
}

impl OutgoingMessage {
    /// Plain text, no markup, no buttons
    pub fn plain(text: impl Into<String>) -> Self {
        OutgoingMessage {
            text: text.into(),
            parse_mode: None,
            keyboard: None,
            disable_web_page_preview: false,
        }
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    /// Attaches the keyboard unless it has no buttons
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = if keyboard.is_empty() { None } else { Some(keyboard) };
        self
    }

    pub fn without_link_preview(mut self) -> Self {
        self.disable_web_page_preview = true;
        self
    }
}

// Reply to an interaction (the button tap itself)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Short notice shown to the user; None just stops the loading spinner
    pub text: Option<String>,
    /// Show the notice as a modal alert instead of a toast
    pub show_alert: bool,
}

impl Acknowledgement {
    pub fn silent() -> Self {
        Acknowledgement::default()
    }

    pub fn notice(text: &str) -> Self {
        Acknowledgement {
            text: Some(text.to_string()),
            show_alert: false,
        }
    }

    pub fn alert(text: &str) -> Self {
        Acknowledgement {
            text: Some(text.to_string()),
            show_alert: true,
        }
    }
}

// A message the bot previously sent (where a button was tapped)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
}

// A button tap delivered by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// Platform id used to acknowledge the tap
    pub id: String,
    /// Message that carried the button; None if the platform didn't include it
    pub message: Option<MessageRef>,
    /// The button's token
    pub data: String,
}

// Everything the platform can deliver to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// A text message; commands are parsed out of it
    Text {
        chat_id: i64,
        private: bool,
        text: String,
    },
    Interaction(Interaction),
}

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Sends a new message to a chat.
    async fn send_message(
        &self,
        chat_id: i64,
        message: &OutgoingMessage,
    ) -> Result<MessageRef, PlatformError>;

    /// Replaces the text and buttons of an existing message.
    async fn edit_message(
        &self,
        target: MessageRef,
        message: &OutgoingMessage,
    ) -> Result<(), PlatformError>;

    /// Acknowledges a button tap, optionally with a transient notice.
    async fn answer_interaction(
        &self,
        interaction_id: &str,
        ack: &Acknowledgement,
    ) -> Result<(), PlatformError>;
}
