use std::sync::Arc;
use std::time::Instant;

use research_core::{AgentEvent, EventSink, ResearchSession, Turn};
use research_llm::{DecisionOracle, OracleError, Supervisor};
use research_search::SearchProvider;

use crate::config::ResearchLoopConfig;
use crate::dispatch::dispatch_action;

pub const LIMIT_MARKER_TEXT: &str = "MAXIMUM PROCESSING STEPS REACHED. TIME TO REPLY TO THE USER";
pub const STUCK_APOLOGY: &str = "I seem to be stuck in a loop. Please try rephrasing your query.";
const STUCK_NOTICE: &str = "Agent is stuck in a loop. Halting.";

/// External parties a research step may call out to.
#[derive(Clone)]
pub struct Collaborators {
    pub oracle: Arc<dyn DecisionOracle>,
    pub supervisor: Arc<dyn Supervisor>,
    pub search: Arc<dyn SearchProvider>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    StepLimit,
    UnrecognizedAction,
    OracleUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Session was not processing; nothing happened.
    Idle,
    Continued,
    Replied,
    Halted(HaltReason),
}

/// Run one research cycle against the session.
///
/// No-op unless the session is processing. Otherwise enforces the soft and hard step
/// limits, asks the oracle for the next action and dispatches it. Every failure ends
/// up either as a turn in the log or as an event on `events`; nothing is returned as
/// an error.
pub async fn advance(
    session: &mut ResearchSession,
    collaborators: &Collaborators,
    events: &dyn EventSink,
    config: &ResearchLoopConfig,
) -> StepOutcome {
    if !session.is_processing() {
        return StepOutcome::Idle;
    }

    let session_id = session.id.clone();
    let trace = StepTrace::new(session_id.as_str());

    trace.stage("step_start", || {
        serde_json::json!({
            "turn_count": session.len(),
            "soft_limit": config.soft_limit(),
            "hard_limit": config.hard_limit(),
            "limit_marker_sent": session.has_limit_marker(),
        })
    });

    if session.len() > config.soft_limit() && !session.has_limit_marker() {
        log::info!(
            "[{}] Soft limit passed at {} turns, asking the oracle to wrap up",
            session_id,
            session.len()
        );
        events.emit(AgentEvent::warning(format!(
            "Reached maximum steps ({}). Forcing a reply.",
            config.max_steps
        )));
        session.add_turn(Turn::limit_marker(LIMIT_MARKER_TEXT));
    }

    if session.len() > config.hard_limit() {
        log::warn!(
            "[{}] Hard limit passed at {} turns, halting",
            session_id,
            session.len()
        );
        events.emit(AgentEvent::error(STUCK_NOTICE));
        session.add_turn(Turn::assistant(STUCK_APOLOGY));
        session.halt();
        return StepOutcome::Halted(HaltReason::StepLimit);
    }

    let started = Instant::now();
    let decision = collaborators.oracle.decide(session.turns()).await;
    trace.call_finished("oracle_decide", started);

    let outcome = match decision {
        Ok(action) => {
            log::debug!("[{}] Oracle chose {}", session_id, action);
            dispatch_action(action, session, collaborators, events).await
        }
        Err(OracleError::UnrecognizedAction(raw)) => {
            log::warn!("[{}] Oracle returned an unknown action: {}", session_id, raw);
            events.emit(AgentEvent::error(format!("Unknown action: {}", raw)));
            session.halt();
            StepOutcome::Halted(HaltReason::UnrecognizedAction)
        }
        Err(error) => {
            log::error!("[{}] Oracle request failed: {}", session_id, error);
            events.emit(AgentEvent::error(format!("Oracle request failed: {}", error)));
            session.halt();
            StepOutcome::Halted(HaltReason::OracleUnavailable)
        }
    };

    trace.stage("step_complete", || {
        serde_json::json!({
            "outcome": format!("{:?}", outcome),
            "turn_count": session.len(),
            "processing": session.is_processing(),
        })
    });

    outcome
}

/// Drive the session until it stops processing.
///
/// `on_cycle` sees the session after every cycle, which is where a UI re-renders.
/// Returns the outcome of the last cycle, or `Idle` if there was nothing to do.
pub async fn run_until_idle<F>(
    session: &mut ResearchSession,
    collaborators: &Collaborators,
    events: &dyn EventSink,
    config: &ResearchLoopConfig,
    mut on_cycle: F,
) -> StepOutcome
where
    F: FnMut(&ResearchSession),
{
    let mut last = StepOutcome::Idle;
    let mut cycles = 0usize;

    while session.is_processing() {
        last = advance(session, collaborators, events, config).await;
        cycles += 1;
        on_cycle(session);
    }

    log::info!(
        "[{}] Research loop idle after {} cycles ({:?})",
        session.id,
        cycles,
        last
    );
    last
}

/// Debug-level trace of one research cycle, keyed by session.
pub(crate) struct StepTrace {
    session_id: String,
}

impl StepTrace {
    pub(crate) fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    /// `details` is only built when debug logging is on.
    fn stage<F>(&self, stage: &str, details: F)
    where
        F: FnOnce() -> serde_json::Value,
    {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("[{}] {}: {}", self.session_id, stage, details());
        }
    }

    pub(crate) fn call_finished(&self, call: &str, started: Instant) {
        log::debug!(
            "[{}] {} took {}ms",
            self.session_id,
            call,
            started.elapsed().as_millis()
        );
    }
}
