//! Phase tag for session state management.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the current stage of the interaction.
///
/// This decides which view is rendered: the introduction, the input form,
/// the pending indicator, or one of the two result panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Introductory view. The form is not visible yet.
    Intro,
    /// The form is visible and no request is pending.
    Ready,
    /// An analysis request is outstanding.
    InFlight,
    /// The last request produced a result.
    Success,
    /// The last request produced an error message.
    Failed,
}

impl Phase {
    /// Whether the session has left the introduction.
    pub fn is_started(self) -> bool {
        !matches!(self, Self::Intro)
    }

    /// Whether a finished request is on display.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Intro => "intro",
            Self::Ready => "ready",
            Self::InFlight => "in_flight",
            Self::Success => "success",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
