//! Text rendering of each session phase.
//!
//! Everything here is a pure function of the session; the driver decides
//! when to print.

use colored::Colorize;
use reflect_core::{Phase, Session};

use crate::command::COMMANDS;

const TITLE: &str = "Emotion Reflection";
const BAR_WIDTH: usize = 24;

pub fn render(session: &Session) -> String {
    match session.phase() {
        Phase::Intro => render_intro(),
        Phase::Ready => {
            let mut out = header();
            out.push_str(&format!(
                "{}\n{}\n",
                "How are you feeling? Share your thoughts...".bold(),
                "  e.g. I feel nervous about my first job interview...".bright_black()
            ));
            push_draft(&mut out, session);
            out
        }
        Phase::InFlight => {
            let mut out = header();
            out.push_str(&format!("{}\n", "Analyzing...".yellow()));
            out
        }
        Phase::Success => {
            let mut out = header();
            push_draft(&mut out, session);
            if let Some(result) = session.result() {
                let filled = result.filled_cells(BAR_WIDTH);
                out.push_str(&format!(
                    "{}\n  {}\n  Confidence {:>4}  [{}{}]\n",
                    "Emotion Analysis".bold(),
                    result.emotion().bright_white().bold(),
                    format!("{}%", result.confidence_percent()),
                    "#".repeat(filled),
                    "-".repeat(BAR_WIDTH - filled).bright_black()
                ));
            }
            out
        }
        Phase::Failed => {
            let mut out = header();
            push_draft(&mut out, session);
            if let Some(message) = session.error_message() {
                out.push_str(&format!("{}\n", message.red()));
            }
            out
        }
    }
}

/// A one-line explanation for an action the session refused, if any.
pub fn refusal_notice(session: &Session) -> Option<String> {
    let notice = match session.phase() {
        Phase::Intro => "Press Enter or type /start to begin.",
        Phase::InFlight => "Still analyzing, please wait.",
        _ if session.input_text().trim().is_empty() => "Share a few words first.",
        _ => return None,
    };
    Some(notice.bright_black().to_string())
}

pub fn render_help() -> String {
    let mut out = format!("{}\n", "Commands:".bold());
    for (name, description) in COMMANDS {
        out.push_str(&format!("  {:<8} {}\n", name.bright_cyan(), description));
    }
    out.push_str(&format!(
        "  {}\n",
        "Any other text is analyzed directly.".bright_black()
    ));
    out
}

pub fn render_unknown(name: &str) -> String {
    format!(
        "{}\n",
        format!("Unknown command {name}. Type /help for a list.").bright_black()
    )
}

fn render_intro() -> String {
    format!(
        "{}\n{}\n\n{}\n",
        format!("=== {TITLE} ===").bright_magenta().bold(),
        "Share your thoughts and discover the emotions behind your words with AI-powered analysis"
            .bright_black(),
        "Press Enter or type /start to try it out.".green()
    )
}

fn header() -> String {
    format!(
        "{}\n{}\n",
        TITLE.bright_magenta().bold(),
        "Share your thoughts and discover your emotions".bright_black()
    )
}

fn push_draft(out: &mut String, session: &Session) {
    if !session.input_text().is_empty() {
        out.push_str(&format!("{} {}\n", "Draft:".bright_black(), session.input_text()));
    }
}
