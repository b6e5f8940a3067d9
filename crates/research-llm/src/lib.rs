pub mod openai;
pub mod prompt;
pub mod provider;

pub use openai::OpenAICompatClient;
pub use provider::{DecisionOracle, OracleError, Result, Supervisor};
