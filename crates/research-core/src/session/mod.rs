pub mod error;
pub mod events;
pub mod types;

pub use error::ResearchError;
pub use events::{AgentEvent, EventSink};
pub use types::{ResearchSession, Role, Turn};
