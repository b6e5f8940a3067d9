//! Prompt assembly for the decision and supervisor calls.
//!
//! The log carries roles the chat API does not know about (`supervisor`,
//! `Timetracker`, ...), so it is flattened into a single role-tagged transcript
//! rather than mapped onto chat messages one by one.

use research_core::Turn;

pub const DECISION_SYSTEM_PROMPT: &str = "\
You are a deep research agent. Study the conversation and choose exactly one next step.

Available actions:
- search: look something up on the web. Fields: {\"action\": \"search\", \"query\": \"<web search query>\"}
- think: ask your supervisor for guidance or critique. Fields: {\"action\": \"think\", \"query\": \"<what you want help with>\"}
- reply: answer the user and finish. Fields: {\"action\": \"reply\", \"message\": \"<final answer>\"}

Gather evidence with search, consult the supervisor when unsure, and reply once the answer is well supported.
If a Timetracker turn says the step budget is exhausted, reply immediately with the best answer you have.

Respond with a single JSON object and nothing else.";

pub const SUPERVISOR_SYSTEM_PROMPT: &str = "\
You are the supervisor of a research agent. Read the conversation so far and the agent's question, \
then give concise, concrete guidance: what is still missing, what to search next, \
or whether the evidence is already enough to answer the user.";

/// Render turns as `[role]: content` blocks separated by blank lines.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("[{}]: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn decision_user_prompt(turns: &[Turn]) -> String {
    format!(
        "Conversation so far:\n\n{}\n\nWhat is the next action?",
        render_transcript(turns)
    )
}

pub fn supervisor_user_prompt(query: &str, context: &[Turn]) -> String {
    format!(
        "Conversation so far:\n\n{}\n\nThe agent asks: {}",
        render_transcript(context),
        query
    )
}
