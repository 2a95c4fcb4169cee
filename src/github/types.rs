// src/github/types.rs
// =============================================================================
// Data types for GitHub search results.
//
// There are two layers here:
// - Raw* structs mirror the JSON the GitHub API sends (serde Deserialize)
// - RepoSummary / ResultPage are what the rest of the bot works with
//
// Rust concepts:
// - serde attributes: #[serde(default)] fills missing fields
// - From trait: converting one type into another
// =============================================================================

use serde::Deserialize;

// One repository as shown in a result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSummary {
    /// owner/name, unique per repository
    pub full_name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub language: Option<String>,
    pub html_url: String,
}

// One fetched page of search results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage {
    pub query: String,
    /// 1-indexed
    pub page: u32,
    pub total_count: u64,
    pub items: Vec<RepoSummary>,
}

impl ResultPage {
    /// True when there is nothing to show on this page
    pub fn is_empty(&self) -> bool {
        self.total_count == 0 || self.items.is_empty()
    }
}

// A README preview ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmePreview {
    pub repo: String,
    pub text: String,
}

// Body of GET /search/repositories
#[derive(Debug, Deserialize)]
pub(crate) struct RawSearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<RawRepo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRepo {
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub language: Option<String>,
    pub html_url: String,
}

impl From<RawRepo> for RepoSummary {
    fn from(raw: RawRepo) -> Self {
        RepoSummary {
            full_name: raw.full_name,
            description: raw.description,
            stars: raw.stargazers_count,
            language: raw.language,
            html_url: raw.html_url,
        }
    }
}

// Body of GET /repos/{owner}/{repo}/readme (only the fields we read)
#[derive(Debug, Deserialize)]
pub(crate) struct RawReadme {
    pub content: Option<String>,
    pub encoding: Option<String>,
}
