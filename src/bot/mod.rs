// src/bot/mod.rs
// =============================================================================
// The bot logic, independent of any particular chat platform.
//
// Submodules:
// - commands: parses /start and /search out of message text
// - token: encodes/decodes the data carried by inline buttons
// - render: turns a page of results into text + buttons
// - router: decides what to do with each command or button tap
// - platform: the ChatPlatform trait and the message types it speaks
// =============================================================================

mod commands;
mod platform;
mod render;
mod router;
mod token;

pub use platform::{
    Acknowledgement, Button, ButtonAction, ChatPlatform, Incoming, Interaction, Keyboard,
    MessageRef, OutgoingMessage, ParseMode,
};
pub use render::Renderer;
pub use router::Router;
