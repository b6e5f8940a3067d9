use async_trait::async_trait;
use research_core::{Action, Turn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Empty response from model")]
    EmptyResponse,

    /// The oracle answered with something outside Search / Think / Reply.
    #[error("Unrecognized action: {0}")]
    UnrecognizedAction(String),
}

pub type Result<T> = std::result::Result<T, OracleError>;

/// Picks the next action from the full conversation log.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    async fn decide(&self, turns: &[Turn]) -> Result<Action>;
}

/// Supervisory reasoner consulted by the `Think` action.
///
/// The returned turn is appended to the log as-is, so the implementation picks its role.
#[async_trait]
pub trait Supervisor: Send + Sync {
    async fn think(&self, query: &str, context: &[Turn]) -> Result<Turn>;
}
