use serde::{Deserialize, Serialize};

use super::{AnalysisError, AnalysisResult};

/// What a single submission produced, already reduced to what the view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SubmitOutcome {
    Succeeded(AnalysisResult),
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

impl From<Result<AnalysisResult, AnalysisError>> for SubmitOutcome {
    fn from(result: Result<AnalysisResult, AnalysisError>) -> Self {
        match result {
            Ok(analysis) => Self::Succeeded(analysis),
            Err(err) => Self::Failed(err.user_message()),
        }
    }
}
