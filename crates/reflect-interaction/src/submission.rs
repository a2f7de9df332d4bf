use std::sync::Arc;

use reflect_core::analysis::{AnalysisError, AnalysisService, EMPTY_TEXT_MESSAGE, SubmitOutcome};

/// Runs one analysis request per call and folds every failure into
/// [`SubmitOutcome::Failed`].
///
/// Callers must not invoke `submit` again for the same session while a call
/// is outstanding; the session's `InFlight` guard enforces that.
pub struct SubmissionCoordinator {
    service: Arc<dyn AnalysisService>,
}

impl SubmissionCoordinator {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        Self { service }
    }

    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("Refusing to submit blank text");
            return SubmitOutcome::from(Err(AnalysisError::validation(EMPTY_TEXT_MESSAGE)));
        }

        let result = self.service.analyze(text).await;
        match &result {
            Ok(analysis) => tracing::info!(
                emotion = analysis.emotion(),
                confidence = analysis.confidence(),
                "Analysis succeeded"
            ),
            Err(err) => tracing::info!(error = %err, "Analysis failed"),
        }
        SubmitOutcome::from(result)
    }
}
