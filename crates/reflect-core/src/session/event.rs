use serde::{Deserialize, Serialize};

use super::Generation;
use crate::analysis::{AnalysisResult, SubmitOutcome};

/// Discrete inputs to the session state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Leave the introduction for the form.
    Start,
    /// Replace the draft text. Stored verbatim.
    EditText { text: String },
    /// Send the current draft for analysis.
    Submit,
    /// The request stamped with `generation` returned a result.
    SubmitSucceeded {
        generation: Generation,
        result: AnalysisResult,
    },
    /// The request stamped with `generation` failed.
    SubmitFailed {
        generation: Generation,
        message: String,
    },
    /// Clear the draft and any displayed outcome.
    Reset,
}

impl SessionEvent {
    pub fn edit_text(text: impl Into<String>) -> Self {
        Self::EditText { text: text.into() }
    }

    /// Builds the completion event for a finished request.
    pub fn completed(generation: Generation, outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Succeeded(result) => Self::SubmitSucceeded { generation, result },
            SubmitOutcome::Failed(message) => Self::SubmitFailed {
                generation,
                message,
            },
        }
    }

    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::EditText { .. } => "edit_text",
            Self::Submit => "submit",
            Self::SubmitSucceeded { .. } => "submit_succeeded",
            Self::SubmitFailed { .. } => "submit_failed",
            Self::Reset => "reset",
        }
    }

    /// Whether this event reports the end of a request.
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Self::SubmitSucceeded { .. } | Self::SubmitFailed { .. }
        )
    }
}
