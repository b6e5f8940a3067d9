//! Two-tier view of the conversation log.
//!
//! User turns and the final reply are shown at the top level; everything the agent
//! did in between is grouped into collapsible "internal work" sections. The view is
//! derived from scratch on every call and borrows from the log.

use research_core::{Role, Turn};

pub const INTERNAL_WORK_TITLE: &str = "🤔 Agent's Internal Work...";

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry<'a> {
    pub icon: &'static str,
    pub turn: &'a Turn,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptBlock<'a> {
    User(&'a Turn),
    /// Consecutive internal turns, in log order.
    InternalWork(Vec<TranscriptEntry<'a>>),
    FinalReply(&'a Turn),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transcript<'a> {
    pub blocks: Vec<TranscriptBlock<'a>>,
}

impl<'a> Transcript<'a> {
    pub fn final_reply(&self) -> Option<&'a Turn> {
        self.blocks.iter().find_map(|block| match block {
            TranscriptBlock::FinalReply(turn) => Some(*turn),
            _ => None,
        })
    }

    pub fn internal_turn_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| match block {
                TranscriptBlock::InternalWork(entries) => entries.len(),
                _ => 0,
            })
            .sum()
    }
}

pub fn role_icon(role: &Role) -> &'static str {
    match role {
        Role::User => "🧑",
        Role::Supervisor => "🧑‍🏫",
        Role::Timetracker => "⏱️",
        Role::Assistant | Role::Other(_) => "🤖",
    }
}

/// The last turn is the final reply once processing has stopped and it came from the
/// assistant.
pub fn is_final_reply(turns: &[Turn], index: usize, processing: bool) -> bool {
    !processing && index + 1 == turns.len() && turns[index].role == Role::Assistant
}

pub fn render_transcript(turns: &[Turn], processing: bool) -> Transcript<'_> {
    let mut blocks = Vec::new();
    let mut index = 0;

    while index < turns.len() {
        let turn = &turns[index];

        if turn.role == Role::User {
            blocks.push(TranscriptBlock::User(turn));
            index += 1;
            continue;
        }

        if is_final_reply(turns, index, processing) {
            blocks.push(TranscriptBlock::FinalReply(turn));
            index += 1;
            continue;
        }

        let mut entries = Vec::new();
        while index < turns.len()
            && turns[index].role != Role::User
            && !is_final_reply(turns, index, processing)
        {
            entries.push(TranscriptEntry {
                icon: role_icon(&turns[index].role),
                turn: &turns[index],
            });
            index += 1;
        }
        blocks.push(TranscriptBlock::InternalWork(entries));
    }

    Transcript { blocks }
}
