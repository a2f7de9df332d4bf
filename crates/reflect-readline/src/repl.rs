//! The blocking rustyline loop that feeds the session driver.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;

use crate::command::{COMMANDS, UiCommand};

/// CLI helper for rustyline that provides completion, highlighting, and hints
/// for slash commands.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.commands.iter().filter(move |cmd| cmd.starts_with(prefix))
    }

    fn is_command_prefix(line: &str) -> bool {
        line.starts_with('/') && !line.contains(' ')
    }

    fn candidates(&self, line: &str) -> Vec<Pair> {
        if !Self::is_command_prefix(line) {
            return vec![];
        }
        self.matching(line)
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect()
    }

    fn command_hint(&self, line: &str) -> Option<String> {
        if !Self::is_command_prefix(line) {
            return None;
        }
        self.matching(line)
            .find(|cmd| cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Default for CliHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(&line[..pos])))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        self.command_hint(&line[..pos])
    }
}

impl Validator for CliHelper {}

/// Reads lines until quit or end of input, sending each as a [`UiCommand`].
///
/// Runs on a blocking thread; the driver on the async side owns all state.
pub fn read_loop(tx: mpsc::Sender<UiCommand>) -> anyhow::Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                let command = UiCommand::parse(&line);
                let quit = command == UiCommand::Quit;
                if tx.blocking_send(command).is_err() || quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                let _ = tx.blocking_send(UiCommand::Quit);
                break;
            }
            Err(err) => {
                let _ = tx.blocking_send(UiCommand::Quit);
                return Err(err.into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_completes_prefix() {
        let helper = CliHelper::new();
        assert_eq!(helper.command_hint("/res").as_deref(), Some("et"));
        assert_eq!(helper.command_hint("/reset"), None);
        assert_eq!(helper.command_hint("hello"), None);
        assert_eq!(helper.command_hint("/draft some"), None);
    }

    #[test]
    fn test_candidates_for_prefix() {
        let helper = CliHelper::new();
        let names: Vec<_> = helper
            .candidates("/s")
            .into_iter()
            .map(|c| c.replacement)
            .collect();
        assert_eq!(names, vec!["/start", "/submit", "/status"]);
        assert!(helper.candidates("plain text").is_empty());
    }
}
