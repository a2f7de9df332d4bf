pub mod analysis;
pub mod config;
pub mod error;
pub mod session;

pub use analysis::{AnalysisError, AnalysisResult, AnalysisService, SubmitOutcome};
pub use config::ClientConfig;
pub use error::{ReflectError, Result};
pub use session::{
    Dispatch, Generation, PendingRequest, Phase, Session, SessionEvent, ViewController,
};
