//! In-memory collaborators for exercising the loop without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use research_core::{Action, AgentEvent, Role, Turn};
use research_llm::{DecisionOracle, OracleError, Supervisor};
use research_search::{SearchError, SearchProvider};
use tokio::sync::mpsc;

pub(crate) enum Scripted {
    Action(Action),
    Unrecognized(String),
    Failure(String),
}

/// Answers from a queue; once the queue is empty, repeats `fallback` forever.
pub(crate) struct ScriptedOracle {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Option<Action>,
    seen_lengths: Mutex<Vec<usize>>,
}

impl ScriptedOracle {
    pub(crate) fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            seen_lengths: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn always(action: Action) -> Self {
        Self {
            fallback: Some(action),
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen_lengths.lock().unwrap().len()
    }

    /// Log length observed on each `decide` call.
    pub(crate) fn seen_lengths(&self) -> Vec<usize> {
        self.seen_lengths.lock().unwrap().clone()
    }
}

#[async_trait]
impl DecisionOracle for ScriptedOracle {
    async fn decide(&self, turns: &[Turn]) -> Result<Action, OracleError> {
        self.seen_lengths.lock().unwrap().push(turns.len());

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Action(action)) => Ok(action),
            Some(Scripted::Unrecognized(raw)) => Err(OracleError::UnrecognizedAction(raw)),
            Some(Scripted::Failure(message)) => Err(OracleError::Api(message)),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| OracleError::Api("oracle script exhausted".to_string())),
        }
    }
}

#[derive(Default)]
pub(crate) struct StubSupervisor {
    role: Option<Role>,
    fail: bool,
}

impl StubSupervisor {
    pub(crate) fn answering_as(role: &str) -> Self {
        Self {
            role: Some(Role::from(role)),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            role: None,
            fail: true,
        }
    }
}

#[async_trait]
impl Supervisor for StubSupervisor {
    async fn think(&self, query: &str, context: &[Turn]) -> Result<Turn, OracleError> {
        if self.fail {
            return Err(OracleError::Api("HTTP 502: supervisor down".to_string()));
        }

        let role = self.role.clone().unwrap_or(Role::Supervisor);
        Ok(Turn::new(
            role,
            format!("Consider: {} ({} turns seen)", query, context.len()),
        ))
    }
}

enum SearchScript {
    Summary(String),
    MissingKey,
    Parse,
}

pub(crate) struct StaticSearch {
    script: SearchScript,
    queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    fn with_script(script: SearchScript) -> Self {
        Self {
            script,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn returning(summary: &str) -> Self {
        Self::with_script(SearchScript::Summary(summary.to_string()))
    }

    pub(crate) fn without_key() -> Self {
        Self::with_script(SearchScript::MissingKey)
    }

    pub(crate) fn unparseable() -> Self {
        Self::with_script(SearchScript::Parse)
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        match &self.script {
            SearchScript::Summary(summary) => Ok(summary.clone()),
            SearchScript::MissingKey => Err(SearchError::MissingApiKey),
            SearchScript::Parse => Err(SearchError::Parse),
        }
    }
}

pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<AgentEvent>) -> Vec<AgentEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
