use crate::waste::bucket::Bucket;
use serde::Deserialize;
use std::path::PathBuf;

const MOBILENET_V2_URL: &str = "https://github.com/onnx/models/raw/main/validated/vision/classification/mobilenet/model/mobilenetv2-7.onnx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    ZeroToOne,
    MinusOneToOne,
    /// Per-channel ImageNet mean/std.
    ImageNet,
}

/// Half-open range of model output indices that map to one bucket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexBand {
    pub start: usize,
    pub end: usize,
    pub bucket: Bucket,
}

impl IndexBand {
    pub fn new(start: usize, end: usize, bucket: Bucket) -> Self {
        Self { start, end, bucket }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    Path(PathBuf),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub enabled: bool,
    /// Local `.onnx` path or an http(s) URL fetched on first use.
    pub source: String,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub normalization: Normalization,
    pub min_confidence: f32,
    pub bands: Vec<IndexBand>,
    pub confidence_floor: f32,
    pub confidence_cap: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source: MOBILENET_V2_URL.to_string(),
            input_shape: (224, 224),
            normalization: Normalization::ImageNet,
            min_confidence: 0.1,
            bands: vec![
                IndexBand::new(0, 400, Bucket::Organic),
                IndexBand::new(400, 700, Bucket::Recyclable),
                IndexBand::new(700, 900, Bucket::Electronic),
                IndexBand::new(900, 1000, Bucket::General),
            ],
            confidence_floor: 0.6,
            confidence_cap: 0.98,
        }
    }
}

impl ModelConfig {
    pub fn model_source(&self) -> ModelSource {
        if self.source.starts_with("http://") || self.source.starts_with("https://") {
            ModelSource::Url(self.source.clone())
        } else {
            ModelSource::Path(PathBuf::from(&self.source))
        }
    }

    /// Indices outside every band count as general waste.
    pub fn bucket_for_index(&self, index: usize) -> Bucket {
        self.bands
            .iter()
            .find(|band| band.contains(index))
            .map(|band| band.bucket)
            .unwrap_or(Bucket::General)
    }

    /// Lifts a raw top score into the presentation range `[floor, cap]`.
    pub fn scaled_confidence(&self, score: f32) -> f32 {
        let score = score.clamp(0.0, 1.0);
        (self.confidence_floor + score * (1.0 - self.confidence_floor))
            .min(self.confidence_cap)
            .clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands_cover_imagenet_contiguously() {
        let config = ModelConfig::default();
        let mut expected_start = 0;
        for band in &config.bands {
            assert_eq!(band.start, expected_start);
            expected_start = band.end;
        }
        assert_eq!(expected_start, 1000);
    }

    #[test]
    fn test_bucket_for_index() {
        let config = ModelConfig::default();
        assert_eq!(config.bucket_for_index(0), Bucket::Organic);
        assert_eq!(config.bucket_for_index(399), Bucket::Organic);
        assert_eq!(config.bucket_for_index(400), Bucket::Recyclable);
        assert_eq!(config.bucket_for_index(750), Bucket::Electronic);
        assert_eq!(config.bucket_for_index(950), Bucket::General);
        assert_eq!(config.bucket_for_index(1000), Bucket::General);
    }

    #[test]
    fn test_scaled_confidence_is_inflated_and_capped() {
        let config = ModelConfig::default();
        assert!((config.scaled_confidence(0.0) - 0.6).abs() < 1e-6);
        assert!((config.scaled_confidence(0.5) - 0.8).abs() < 1e-6);
        assert!((config.scaled_confidence(1.0) - 0.98).abs() < 1e-6);
        assert!((config.scaled_confidence(7.0) - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_model_source_kind() {
        let mut config = ModelConfig::default();
        assert!(matches!(config.model_source(), ModelSource::Url(_)));

        config.source = "./models/mobilenetv2-7.onnx".to_string();
        assert_eq!(
            config.model_source(),
            ModelSource::Path(PathBuf::from("./models/mobilenetv2-7.onnx"))
        );
    }
}
