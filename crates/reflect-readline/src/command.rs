//! Parsing REPL lines into commands.

/// Slash commands offered for completion and listed by `/help`.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/start", "Leave the introduction and open the form"),
    ("/draft", "Replace the draft without submitting: /draft <text>"),
    ("/submit", "Analyze the current draft"),
    ("/reset", "Clear the draft and the last result"),
    ("/status", "Show the current view again"),
    ("/help", "List commands"),
    ("/quit", "Leave"),
];

/// A single user action from the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// An empty line. Starts the session from the introduction.
    Continue,
    Start,
    /// Set the draft only.
    Draft(String),
    /// Submit the current draft.
    Submit,
    /// Plain text: set it as the draft and submit it.
    Analyze(String),
    Reset,
    Status,
    Help,
    Quit,
    /// An unrecognised slash command.
    Unknown(String),
}

impl UiCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Continue;
        }
        if trimmed == "quit" || trimmed == "exit" {
            return Self::Quit;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Analyze(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, Some(argument)),
            None => (rest, None),
        };
        match name {
            "start" => Self::Start,
            "draft" => Self::Draft(argument.unwrap_or_default().to_string()),
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "status" => Self::Status,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(format!("/{name}")),
        }
    }
}
