use async_trait::async_trait;
use research_core::AgentEvent;
use thiserror::Error;

/// Search failures.
///
/// The `Display` text is what lands in the conversation log, so the oracle sees the
/// failure and can decide what to do about it.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Error: SERP_API_KEY not configured.")]
    MissingApiKey,

    #[error("Error fetching search results: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Error: Failed to parse search results.")]
    Parse,
}

impl SearchError {
    /// The operator-facing notice that accompanies the in-band text.
    pub fn notice(&self) -> AgentEvent {
        match self {
            SearchError::MissingApiKey => AgentEvent::error(
                "SERP_API_KEY not found. Search will return an error message.",
            ),
            SearchError::Request(error) => {
                AgentEvent::error(format!("Error during SerpAPI request: {}", error))
            }
            SearchError::Parse => AgentEvent::error("Failed to parse search results."),
        }
    }
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Ranked results rendered as text, ready to embed in a turn.
    async fn search(&self, query: &str) -> Result<String, SearchError>;
}
