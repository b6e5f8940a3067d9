pub mod config;
pub mod controller;
pub mod dispatch;
pub mod transcript;

pub use config::ResearchLoopConfig;
pub use controller::{advance, run_until_idle, Collaborators, HaltReason, StepOutcome};
pub use dispatch::dispatch_action;
pub use transcript::{
    is_final_reply, render_transcript, role_icon, Transcript, TranscriptBlock, TranscriptEntry,
};

#[cfg(test)]
pub(crate) mod testing;
