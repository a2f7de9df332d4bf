use async_trait::async_trait;
use thiserror::Error;

use super::AnalysisResult;

/// Shown when the service rejects a request without a usable message.
pub const SERVICE_FAILURE_MESSAGE: &str = "Failed to analyze emotion";

/// Shown when the service could not be reached or failed in a way that
/// carries nothing a user can act on.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when a submission is attempted with blank text.
pub const EMPTY_TEXT_MESSAGE: &str = "Text cannot be empty";

/// Everything that can go wrong while asking the service for an analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The text was blank after trimming. No request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The service answered with a non-success status.
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The request never produced a response (refused, reset, timed out).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with success but the body was not a result.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// The single line shown in the failure panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Service { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Service { .. } => SERVICE_FAILURE_MESSAGE.to_string(),
            Self::Transport(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::MalformedResponse(detail) if !detail.trim().is_empty() => {
                format!("Unexpected response from analysis service: {detail}")
            }
            Self::MalformedResponse(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// The remote collaborator that turns text into an [`AnalysisResult`].
///
/// Implementations make exactly one attempt per call; retry and caching are
/// not their concern.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;
}
