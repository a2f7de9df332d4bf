//! The emotion label and confidence returned by the analysis service.

use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// A single emotion classification.
///
/// Instances are only built through [`AnalysisResult::new`], so a value in
/// hand always carries a non-empty label and a confidence inside `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnalysisResult")]
pub struct AnalysisResult {
    emotion: String,
    confidence: f64,
}

#[derive(Deserialize)]
struct RawAnalysisResult {
    emotion: String,
    confidence: f64,
}

// The error text ends up inside a serde error, so only the detail is kept.
impl TryFrom<RawAnalysisResult> for AnalysisResult {
    type Error = String;

    fn try_from(raw: RawAnalysisResult) -> Result<Self, Self::Error> {
        Self::new(raw.emotion, raw.confidence).map_err(|err| match err {
            AnalysisError::MalformedResponse(detail) => detail,
            other => other.to_string(),
        })
    }
}

impl AnalysisResult {
    /// Validates and builds a result.
    ///
    /// Returns [`AnalysisError::MalformedResponse`] when the label is blank or
    /// the confidence is not a finite number in `[0.0, 1.0]`.
    pub fn new(emotion: impl Into<String>, confidence: f64) -> Result<Self, AnalysisError> {
        let emotion = emotion.into();
        if emotion.trim().is_empty() {
            return Err(AnalysisError::malformed("emotion label is empty"));
        }
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(AnalysisError::malformed(format!(
                "confidence {confidence} is outside [0, 1]"
            )));
        }
        Ok(Self {
            emotion,
            confidence,
        })
    }

    pub fn emotion(&self) -> &str {
        &self.emotion
    }

    /// The confidence exactly as received.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Confidence as a whole percentage, clamped to `0..=100`.
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Number of filled cells in a bar of `width` cells.
    pub fn filled_cells(&self, width: usize) -> usize {
        ((self.confidence.clamp(0.0, 1.0) * width as f64).round() as usize).min(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_label() {
        let err = AnalysisResult::new("  ", 0.5).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        assert!(AnalysisResult::new("Happy", 1.01).is_err());
        assert!(AnalysisResult::new("Happy", -0.1).is_err());
        assert!(AnalysisResult::new("Happy", f64::NAN).is_err());
        assert!(AnalysisResult::new("Happy", 0.0).is_ok());
        assert!(AnalysisResult::new("Happy", 1.0).is_ok());
    }

    #[test]
    fn test_percent_rounds_without_touching_stored_value() {
        let result = AnalysisResult::new("Anxious", 0.875).unwrap();
        assert_eq!(result.confidence_percent(), 88);
        assert_eq!(result.confidence(), 0.875);
    }

    #[test]
    fn test_filled_cells() {
        let result = AnalysisResult::new("Calm", 0.87).unwrap();
        assert_eq!(result.filled_cells(20), 17);
        assert_eq!(result.filled_cells(0), 0);

        let full = AnalysisResult::new("Calm", 1.0).unwrap();
        assert_eq!(full.filled_cells(10), 10);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: AnalysisResult =
            serde_json::from_str(r#"{"emotion":"joy","confidence":0.87}"#).unwrap();
        assert_eq!(ok.emotion(), "joy");
        assert_eq!(ok.confidence(), 0.87);

        let bad = serde_json::from_str::<AnalysisResult>(r#"{"emotion":"","confidence":0.5}"#);
        assert!(bad.is_err());
    }
}
