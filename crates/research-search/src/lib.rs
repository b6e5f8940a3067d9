pub mod provider;
pub mod serpapi;

pub use provider::{SearchError, SearchProvider};
pub use serpapi::SerpApiClient;
