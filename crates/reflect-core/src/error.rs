//! Error types for the Emotion Reflection client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the ambient layers of the client
/// (configuration, file access, serialization).
///
/// Analysis failures have their own type, [`crate::analysis::AnalysisError`],
/// because they never escape the submission boundary.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ReflectError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (e.g. the HTTP client could not be built)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReflectError {
    /// Creates an IO error for `path`, keeping the error kind
    pub fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Io {
            message: format!("{}: {} (kind: {:?})", path.display(), err, err.kind()),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<toml::de::Error> for ReflectError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ReflectError>`.
pub type Result<T> = std::result::Result<T, ReflectError>;
