use std::time::Instant;

use research_core::{Action, AgentEvent, EventSink, ResearchSession, Turn};

use crate::controller::{Collaborators, StepOutcome, StepTrace};

/// Carry out one oracle action against the session.
///
/// Search and supervisor failures are written into the log as turn content so the
/// oracle can see them on its next decision; they do not stop the loop.
pub async fn dispatch_action(
    action: Action,
    session: &mut ResearchSession,
    collaborators: &Collaborators,
    events: &dyn EventSink,
) -> StepOutcome {
    let trace = StepTrace::new(session.id.as_str());

    match action {
        Action::Search { query } => {
            events.emit(AgentEvent::progress(format!("Searching for: {}", query)));
            let started = Instant::now();
            let result = collaborators.search.search(&query).await;
            trace.call_finished("search", started);
            events.emit(AgentEvent::ProgressFinished);

            let summary = match result {
                Ok(summary) => summary,
                Err(error) => {
                    log::warn!("[{}] Search for {:?} failed: {}", session.id, query, error);
                    events.emit(error.notice());
                    error.to_string()
                }
            };

            session.add_turn(Turn::assistant(format!(
                "The search result for {} is {}",
                query, summary
            )));
            StepOutcome::Continued
        }
        Action::Think { query } => {
            events.emit(AgentEvent::progress("Thinking..."));
            let started = Instant::now();
            let result = collaborators.supervisor.think(&query, session.turns()).await;
            trace.call_finished("supervisor_think", started);
            events.emit(AgentEvent::ProgressFinished);

            let turn = match result {
                Ok(turn) => turn,
                Err(error) => {
                    log::warn!("[{}] Supervisor call failed: {}", session.id, error);
                    events.emit(AgentEvent::error(format!(
                        "Supervisor request failed: {}",
                        error
                    )));
                    Turn::supervisor(format!("Supervisor unavailable: {}", error))
                }
            };

            session.add_turn(turn);
            StepOutcome::Continued
        }
        Action::Reply { message } => {
            session.add_turn(Turn::assistant(message));
            session.halt();
            StepOutcome::Replied
        }
    }
}
