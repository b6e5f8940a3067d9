pub mod action;
pub mod session;

pub use action::Action;
pub use session::events::{AgentEvent, EventSink};
pub use session::types::{ResearchSession, Role, Turn};
pub use session::ResearchError;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
