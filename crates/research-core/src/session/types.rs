use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role tag on a conversation turn.
///
/// The set is open: the supervisor may answer under any role it likes, and those
/// roles are carried through as `Other` without loss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    Supervisor,
    /// Marker role for the step-limit sentinel turn.
    Timetracker,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Supervisor => "supervisor",
            Role::Timetracker => "Timetracker",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "supervisor" => Role::Supervisor,
            "Timetracker" => Role::Timetracker,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(default = "Utc::now", skip_serializing)]
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn supervisor(content: impl Into<String>) -> Self {
        Self::new(Role::Supervisor, content)
    }

    pub fn limit_marker(content: impl Into<String>) -> Self {
        Self::new(Role::Timetracker, content)
    }
}

/// Session-scoped state: the conversation log plus the processing flag.
///
/// The log is append-only. A session is discarded as a whole; individual turns are
/// never removed or rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchSession {
    pub id: String,
    turns: Vec<Turn>,
    processing: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResearchSession {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            turns: Vec::new(),
            processing: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Fresh session with a random id.
    pub fn start() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Start a session from an existing log, e.g. a replayed transcript.
    pub fn with_turns(id: impl Into<String>, turns: Vec<Turn>, processing: bool) -> Self {
        let mut session = Self::new(id);
        session.turns = turns;
        session.processing = processing;
        session
    }

    /// Record a new top-level user query and start processing it.
    pub fn submit_query(&mut self, query: impl Into<String>) {
        self.add_turn(Turn::user(query));
        self.processing = true;
    }

    pub fn add_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.updated_at = Utc::now();
    }

    /// Stop processing. The log is left as it is.
    pub fn halt(&mut self) {
        self.processing = false;
        self.updated_at = Utc::now();
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn has_limit_marker(&self) -> bool {
        self.turns.iter().any(|turn| turn.role == Role::Timetracker)
    }
}
