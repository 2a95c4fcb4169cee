// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Submodules:
// - search: repository search, one ranked page at a time
// - readme: README fetch, decode and truncation
// - types: JSON shapes and the result types the bot renders
//
// Both clients share one reqwest::Client built by build_http_client().
// =============================================================================

mod readme;
mod search;
mod types;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

use crate::config::Config;

pub use readme::{ContentClient, HttpContentClient};
pub use search::{HttpSearchClient, SearchClient};
pub use types::{ReadmePreview, RepoSummary, ResultPage};

// Builds the HTTP client used for every GitHub request
//
// - Sends the v3 JSON Accept header on every request
// - Identifies itself with a User-Agent (GitHub rejects requests without one)
// - Applies the configured per-request timeout
pub fn build_http_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github.v3+json"),
    );

    Client::builder()
        .default_headers(headers)
        .user_agent(concat!("gh-search-bot/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout)
        .build()
        .context("failed to build GitHub HTTP client")
}

// Serves exactly one canned HTTP response on a local port and returns the
// base URL to point a client at
#[cfg(test)]
pub(crate) async fn serve_once(response: String) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}")
}

// Formats a minimal HTTP/1.1 response
#[cfg(test)]
pub(crate) fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )
}
