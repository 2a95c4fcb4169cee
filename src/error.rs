// src/error.rs
// =============================================================================
// Typed errors shared across the bot.
//
// - UpstreamError: the GitHub API failed (bad status, timeout, network, JSON)
// - TokenError: a button token could not be decoded
// - PlatformError: the chat platform refused or could not take a request
//
// The application entry point (main.rs) still uses anyhow::Result, these
// enums are what the clients and the router hand to each other.
// =============================================================================

use thiserror::Error;

/// A call to the GitHub API did not produce a usable response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The request did not finish within the configured timeout
    #[error("request timed out")]
    Timeout,
    /// GitHub answered with a non-success HTTP status
    #[error("HTTP {0}")]
    Status(u16),
    /// DNS, connect or reset failure before any status was received
    #[error("network error: {0}")]
    Network(String),
    /// The body was not the JSON shape we expected
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return UpstreamError::Timeout;
        }

        if let Some(status) = e.status() {
            return UpstreamError::Status(status.as_u16());
        }

        if e.is_decode() {
            return UpstreamError::InvalidResponse(e.without_url().to_string());
        }

        UpstreamError::Network(e.without_url().to_string())
    }
}

/// A button token that could not be turned back into an action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not start with a prefix we know about
    #[error("unknown token shape")]
    Unknown,
    /// The prefix is known but the payload is broken
    #[error("malformed token: {0}")]
    Malformed(String),
}

/// The chat platform did not accept a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform answered but refused (bad markup, message too old, ...)
    #[error("rejected by platform: {description}")]
    Rejected { description: String },
    /// The request never got a proper answer
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for PlatformError {
    fn from(e: reqwest::Error) -> Self {
        // The Bot API URL embeds the token, so it must not end up in logs
        PlatformError::Transport(e.without_url().to_string())
    }
}
