use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use colored::Colorize;
use research_core::{AgentEvent, EventSink, ResearchError, ResearchSession};
use research_loop::transcript::INTERNAL_WORK_TITLE;
use research_loop::{render_transcript, role_icon, Transcript, TranscriptBlock};

pub const TITLE: &str = "🤖 Deep Research Agent";
pub const CAPTION: &str =
    "This agent performs deep research on a given topic, consulting a supervisor for guidance.";
pub const PROMPT: &str = "What is your research query?";

/// Terminal front end: redraws the transcript and shows notices and progress.
pub struct TerminalView {
    clear_screen: bool,
    notices: Mutex<Vec<AgentEvent>>,
}

impl TerminalView {
    pub fn new(clear_screen: bool) -> Self {
        Self {
            clear_screen,
            notices: Mutex::new(Vec::new()),
        }
    }

    /// Forget notices from the previous query.
    pub fn clear_notices(&self) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.clear();
        }
    }

    pub fn draw(&self, session: &ResearchSession) -> Result<(), ResearchError> {
        let transcript = render_transcript(session.turns(), session.is_processing());
        let notices = self
            .notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default();

        let mut stdout = io::stdout().lock();
        if self.clear_screen {
            write!(stdout, "\x1b[2J\x1b[H")?;
        }
        writeln!(stdout, "{}", TITLE.cyan().bold())?;
        writeln!(stdout, "{}", CAPTION.dimmed())?;
        writeln!(stdout, "{}", "─".repeat(60).dimmed())?;
        write!(stdout, "{}", format_transcript(&transcript))?;
        for notice in &notices {
            if let Some(line) = format_notice(notice) {
                writeln!(stdout, "{}", line)?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    /// Next query from stdin; `None` once input is closed.
    pub fn read_query(&self) -> Result<Option<String>, ResearchError> {
        print!("\n{} ", PROMPT.cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}

impl EventSink for TerminalView {
    fn emit(&self, event: AgentEvent) {
        match &event {
            AgentEvent::ProgressStarted { label } => {
                print!("\r{} {}", "⏳".yellow(), label.dimmed());
                flush_status_line();
                return;
            }
            AgentEvent::ProgressFinished => {
                print!("\r\x1b[2K");
                flush_status_line();
                return;
            }
            AgentEvent::Warning { .. } | AgentEvent::Error { .. } => {
                if let Some(line) = format_notice(&event) {
                    println!("{}", line);
                }
            }
        }

        if let Ok(mut notices) = self.notices.lock() {
            notices.push(event);
        }
    }
}

fn flush_status_line() {
    if let Err(error) = io::stdout().flush() {
        log::debug!("Failed to flush progress line: {}", error);
    }
}

fn format_notice(event: &AgentEvent) -> Option<String> {
    match event {
        AgentEvent::Warning { message } => Some(format!("⚠️  {}", message).yellow().to_string()),
        AgentEvent::Error { message } => Some(format!("❌ {}", message).red().to_string()),
        _ => None,
    }
}

pub fn format_transcript(transcript: &Transcript<'_>) -> String {
    let mut out = String::new();

    for block in &transcript.blocks {
        match block {
            TranscriptBlock::User(turn) => {
                out.push_str(&format!("{} {}\n", role_icon(&turn.role), "You:".cyan().bold()));
                out.push_str(&indent(&turn.content, "   "));
            }
            TranscriptBlock::InternalWork(entries) => {
                out.push_str(&format!("{}\n", INTERNAL_WORK_TITLE.yellow()));
                for entry in entries {
                    out.push_str(&format!(
                        "   {} {}\n",
                        entry.icon,
                        format!("{}:", entry.turn.role).bold()
                    ));
                    out.push_str(&indent(&entry.turn.content, "   │ ").dimmed().to_string());
                }
            }
            TranscriptBlock::FinalReply(turn) => {
                out.push_str(&format!(
                    "{} {}\n",
                    role_icon(&turn.role),
                    "Assistant:".green().bold()
                ));
                out.push_str(&indent(&turn.content, "   "));
            }
        }
        out.push('\n');
    }

    out
}

fn indent(content: &str, prefix: &str) -> String {
    content
        .lines()
        .map(|line| format!("{}{}\n", prefix, line))
        .collect()
}
