//! SerpApi adapter.
//!
//! Issues `GET {base_url}?api_key=..&q=..` and condenses the `organic_results`
//! array into a short text block, keeping the provider's ranking.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::provider::{SearchError, SearchProvider};

pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search.json";
pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const NO_RESULTS: &str = "No organic results found.";

pub struct SerpApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    max_results: usize,
}

impl SerpApiClient {
    /// A missing key is not an error here; every search then fails in-band.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: DEFAULT_SERPAPI_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SearchError::MissingApiKey);
        };

        log::debug!("GET {} q={:?}", self.base_url, query);

        // The key travels in the query string; keep it out of error text.
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("api_key", api_key), ("q", query)])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| SearchError::Request(error.without_url()))?;

        let body = response
            .text()
            .await
            .map_err(|error| SearchError::Request(error.without_url()))?;

        let parsed: SerpResponse = serde_json::from_str(&body).map_err(|error| {
            log::warn!("Undecodable SerpApi response: {}", error);
            SearchError::Parse
        })?;

        Ok(summarize(parsed, self.max_results))
    }
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Option<Vec<OrganicResult>>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

fn summarize(response: SerpResponse, max_results: usize) -> String {
    let results = match response.organic_results {
        Some(results) if !results.is_empty() => results,
        _ => return NO_RESULTS.to_string(),
    };

    results
        .iter()
        .take(max_results)
        .map(|result| {
            format!(
                "Title: {}\nLink: {}\nSnippet: {}\n---",
                result.title.as_deref().unwrap_or("No Title"),
                result.link.as_deref().unwrap_or("#"),
                result.snippet.as_deref().unwrap_or("No snippet available.")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
