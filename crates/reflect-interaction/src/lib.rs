//! Talking to the emotion analysis service.
//!
//! [`HttpAnalysisService`] is the network collaborator and
//! [`SubmissionCoordinator`] turns its results into view outcomes.

pub mod http_analysis_service;
pub mod submission;

pub use http_analysis_service::HttpAnalysisService;
pub use submission::SubmissionCoordinator;
