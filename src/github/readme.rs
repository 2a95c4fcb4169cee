// src/github/readme.rs
// =============================================================================
// Fetches a repository's README through the GitHub contents API.
//
// GET {api}/repos/{owner}/{repo}/readme returns JSON with the file body in
// `content`, base64-encoded and wrapped at 60 columns.
//
// Everything that goes wrong here (404, timeout, bad base64, empty file)
// ends up as None: "no README" and "unreadable README" look the same to the
// user, so the caller only has to handle one case.
// =============================================================================

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use tracing::{debug, warn};

use super::types::{RawReadme, ReadmePreview};
use crate::error::UpstreamError;

/// Maximum number of characters kept from a README
pub const PREVIEW_MAX_CHARS: usize = 1500;

/// Appended when a README was cut at PREVIEW_MAX_CHARS
pub const TRUNCATION_MARKER: &str = "...";

#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Returns the README preview for `repo` (owner/name), or None.
    async fn fetch_readme(&self, repo: &str) -> Option<ReadmePreview>;
}

// reqwest-backed implementation of ContentClient
#[derive(Debug, Clone)]
pub struct HttpContentClient {
    http: Client,
    base_api: String,
    token: Option<String>,
}

impl HttpContentClient {
    pub fn new(http: Client, base_api: String, token: Option<String>) -> Self {
        Self {
            http,
            base_api,
            token,
        }
    }

    // Fetches the raw README payload
    //
    // Returns:
    //   Ok(Some(body)) - GitHub returned a readme with content
    //   Ok(None)       - non-success status or no `content` field
    //   Err(_)         - the request itself failed
    async fn fetch_payload(&self, repo: &str) -> Result<Option<RawReadme>, UpstreamError> {
        let url = format!("{}/repos/{}/readme", self.base_api, repo);

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(repo, status = status.as_u16(), "README not available");
            return Ok(None);
        }

        let body: RawReadme = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.without_url().to_string()))?;

        Ok(Some(body))
    }
}

#[async_trait]
impl ContentClient for HttpContentClient {
    async fn fetch_readme(&self, repo: &str) -> Option<ReadmePreview> {
        let payload = match self.fetch_payload(repo).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                warn!(repo, error = %e, "README fetch failed");
                return None;
            }
        };

        // The contents API only ever uses base64, anything else we can't read
        if let Some(encoding) = payload.encoding.as_deref() {
            if encoding != "base64" {
                debug!(repo, encoding, "README has an unsupported encoding");
                return None;
            }
        }

        let text = decode_content(payload.content.as_deref()?)?;
        if text.is_empty() {
            return None;
        }

        Some(ReadmePreview {
            repo: repo.to_string(),
            text: truncate_preview(&text),
        })
    }
}

// Decodes a base64 payload into text
//
// - Whitespace inside the payload (GitHub's line wrapping) is skipped
// - Byte sequences that are not valid UTF-8 are dropped
// - Returns None when the payload isn't valid base64
pub fn decode_content(encoded: &str) -> Option<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "README content is not valid base64");
            return None;
        }
    };

    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    Some(text)
}

// Cuts text to PREVIEW_MAX_CHARS characters and appends the marker if
// anything was removed. Counts chars, not bytes.
pub fn truncate_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does fetch_readme return Option and not Result?
//    - The caller only ever shows "README not found" when there's no preview
//    - Failures are still logged here before they turn into None
//
// 2. What is the `?` on an Option?
//    - Inside a function returning Option, `x?` returns None early when x is None
//    - payload.content.as_deref()? bails out if GitHub sent no content
//
// 3. What does utf8_chunks() do?
//    - Walks a byte slice and yields the valid UTF-8 runs between bad bytes
//    - Pushing only chunk.valid() drops the bytes that aren't text
// -----------------------------------------------------------------------------
