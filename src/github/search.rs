// src/github/search.rs
// =============================================================================
// Repository search against the GitHub REST API.
//
// GET {api}/search/repositories?q=..&page=..&per_page=..&sort=stars&order=desc
//
// - Sorting is done by GitHub (stars, descending), we never re-sort
// - Pages are 1-indexed, exactly like GitHub's `page` parameter
// - One attempt only: any failure comes back as an UpstreamError
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::types::{RawSearchResponse, RepoSummary, ResultPage};
use crate::error::UpstreamError;

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Fetches one page of repositories matching `query`.
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ResultPage, UpstreamError>;
}

// reqwest-backed implementation of SearchClient
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: Client,
    base_api: String,
    token: Option<String>,
}

impl HttpSearchClient {
    pub fn new(http: Client, base_api: String, token: Option<String>) -> Self {
        Self {
            http,
            base_api,
            token,
        }
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ResultPage, UpstreamError> {
        let url = format!("{}/search/repositories", self.base_api);
        debug!(query, page, page_size, "GitHub search");

        let mut request = self.http.get(&url).query(&search_params(query, page, page_size));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            let err = UpstreamError::from(e);
            warn!(error = %err, query, page, "GitHub search request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), query, page, "GitHub search returned an error status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let raw: RawSearchResponse = response.json().await.map_err(|e| {
            UpstreamError::InvalidResponse(e.without_url().to_string())
        })?;

        Ok(ResultPage {
            query: query.to_string(),
            page,
            total_count: raw.total_count,
            items: raw.items.into_iter().map(RepoSummary::from).collect(),
        })
    }
}

// Builds the query string pairs for one search request
fn search_params(query: &str, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("q", query.to_string()),
        ("page", page.to_string()),
        ("per_page", page_size.to_string()),
        ("sort", "stars".to_string()),
        ("order", "desc".to_string()),
    ]
}
