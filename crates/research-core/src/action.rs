use serde::{Deserialize, Serialize};
use std::fmt;

/// The next step chosen by the decision oracle.
///
/// Wire form is an internally tagged object, e.g. `{"action": "search", "query": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Search { query: String },
    Think { query: String },
    Reply { message: String },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Search { .. } => "search",
            Action::Think { .. } => "think",
            Action::Reply { .. } => "reply",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Search { query } => write!(f, "Search(query={query:?})"),
            Action::Think { query } => write!(f, "Think(query={query:?})"),
            Action::Reply { message } => write!(f, "Reply(message={message:?})"),
        }
    }
}
