use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Operator-facing notices raised while a research cycle runs.
///
/// These never enter the conversation log; they are what a UI shows next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    Warning {
        message: String,
    },

    Error {
        message: String,
    },

    /// An external call started; shown until the matching `ProgressFinished`.
    ProgressStarted {
        label: String,
    },

    ProgressFinished,
}

impl AgentEvent {
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn progress(label: impl Into<String>) -> Self {
        Self::ProgressStarted {
            label: label.into(),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: AgentEvent);
}

impl EventSink for mpsc::UnboundedSender<AgentEvent> {
    fn emit(&self, event: AgentEvent) {
        if self.send(event).is_err() {
            log::debug!("Event receiver dropped, notice discarded");
        }
    }
}
