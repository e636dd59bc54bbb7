use crate::waste::bucket::WasteCategory;
use serde::{Deserialize, Serialize};

/// Which tier of the classifier chain produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Model,
    PixelHeuristic,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: WasteCategory,
    /// Presentation score in `[0, 1]`. Scaled upward, not a calibrated probability.
    pub confidence: f32,
    pub items: Vec<String>,
    pub recommendations: Vec<String>,
    pub source: ClassificationSource,
}

impl ClassificationResult {
    pub fn new(
        category: WasteCategory,
        confidence: f32,
        items: Vec<String>,
        recommendations: Vec<String>,
        source: ClassificationSource,
    ) -> Self {
        Self {
            category,
            confidence: clamp_confidence(confidence),
            items,
            recommendations,
            source,
        }
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

pub fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        let high = ClassificationResult::new(
            WasteCategory::Dry,
            1.7,
            vec![],
            vec![],
            ClassificationSource::Model,
        );
        let low = ClassificationResult::new(
            WasteCategory::Dry,
            -0.2,
            vec![],
            vec![],
            ClassificationSource::Model,
        );
        let nan = ClassificationResult::new(
            WasteCategory::Dry,
            f32::NAN,
            vec![],
            vec![],
            ClassificationSource::Model,
        );

        assert_eq!(high.confidence, 1.0);
        assert_eq!(low.confidence, 0.0);
        assert_eq!(nan.confidence, 0.0);
    }

    #[test]
    fn test_confidence_percent_rounds() {
        let result = ClassificationResult::new(
            WasteCategory::Wet,
            0.876,
            vec![],
            vec![],
            ClassificationSource::PixelHeuristic,
        );
        assert_eq!(result.confidence_percent(), 88);
    }
}
