//! Analysis results and the collaborator that produces them.

pub mod model;
pub mod outcome;
pub mod service;

pub use model::AnalysisResult;
pub use outcome::SubmitOutcome;
pub use service::{
    AnalysisError, AnalysisService, EMPTY_TEXT_MESSAGE, GENERIC_FAILURE_MESSAGE,
    SERVICE_FAILURE_MESSAGE,
};
