use crate::image_classifier::interface::{ClassifierTier, ModelLoader, Verdict};
use crate::image_classifier::models::model_config::{ModelConfig, ModelSource};
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::image_classifier::tract::output::{to_probabilities, top_prediction};
use crate::library::logger::interface::Logger;
use crate::waste::result::ClassificationSource;
use async_trait::async_trait;
use image::DynamicImage;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn from_path(
        config: ModelConfig,
        path: &Path,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let model = tract_onnx::onnx().model_for_path(path)?;
        Self::from_inference_model(model, config)
    }

    pub fn from_bytes(
        config: ModelConfig,
        bytes: &[u8],
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let model = tract_onnx::onnx().model_for_read(&mut Cursor::new(bytes))?;
        Self::from_inference_model(model, config)
    }

    fn from_inference_model(
        model: InferenceModel,
        config: ModelConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = config.input_shape;

        let model = model
            .with_input_fact(
                0,
                f32::fact([1, 3, height as usize, width as usize]).into(),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model, config })
    }

    fn scores(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = self.config.input_shape;
        let input = resize_image_to_tensor(image, width, height, self.config.normalization)?;

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs.first().ok_or("model produced no outputs")?;

        Ok(output.to_array_view::<f32>()?.iter().copied().collect())
    }
}

/// Maps one output vector onto a bucket via the configured index bands.
/// `None` when the top score does not clear `min_confidence`.
pub fn verdict_from_scores(scores: &[f32], config: &ModelConfig) -> Option<Verdict> {
    let probabilities = to_probabilities(scores);
    let (index, score) = top_prediction(&probabilities)?;

    if score < config.min_confidence {
        return None;
    }

    Some(Verdict {
        bucket: config.bucket_for_index(index),
        confidence: config.scaled_confidence(score),
        source: ClassificationSource::Model,
    })
}

impl ClassifierTier for ImageClassifierTractOnnx {
    fn name(&self) -> &'static str {
        "model"
    }

    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Option<Verdict>, Box<dyn std::error::Error + Send + Sync>> {
        let scores = self.scores(image)?;

        Ok(verdict_from_scores(&scores, &self.config))
    }
}

pub struct TractOnnxModelLoader {
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl TractOnnxModelLoader {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("model_loader"),
        }
    }
}

async fn fetch_model(url: &str) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[async_trait]
impl ModelLoader for TractOnnxModelLoader {
    async fn load(
        &self,
    ) -> Result<Arc<dyn ClassifierTier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>
    {
        let config = self.config.clone();

        let classifier = match config.model_source() {
            ModelSource::Path(path) => {
                self.logger
                    .info(&format!("Loading model from {}", path.display()))?;
                tokio::task::spawn_blocking(move || {
                    ImageClassifierTractOnnx::from_path(config, &path)
                })
                .await??
            }
            ModelSource::Url(url) => {
                self.logger.info(&format!("Fetching model from {}", url))?;
                let bytes = fetch_model(&url).await?;
                self.logger
                    .debug(&format!("Fetched {} bytes, building plan", bytes.len()))?;
                tokio::task::spawn_blocking(move || {
                    ImageClassifierTractOnnx::from_bytes(config, &bytes)
                })
                .await??
            }
        };

        self.logger.info("Model ready")?;

        Ok(Arc::new(classifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use crate::waste::bucket::Bucket;
    use chrono::FixedOffset;

    fn one_hot(index: usize, score: f32) -> Vec<f32> {
        let rest = (1.0 - score) / 999.0;
        let mut scores = vec![rest; 1000];
        scores[index] = score;
        scores
    }

    #[test]
    fn test_verdict_from_scores_uses_bands() {
        let config = ModelConfig::default();

        let organic = verdict_from_scores(&one_hot(150, 0.8), &config).unwrap();
        let recyclable = verdict_from_scores(&one_hot(440, 0.8), &config).unwrap();
        let electronic = verdict_from_scores(&one_hot(782, 0.8), &config).unwrap();
        let general = verdict_from_scores(&one_hot(963, 0.8), &config).unwrap();

        assert_eq!(organic.bucket, Bucket::Organic);
        assert_eq!(recyclable.bucket, Bucket::Recyclable);
        assert_eq!(electronic.bucket, Bucket::Electronic);
        assert_eq!(general.bucket, Bucket::General);
        assert_eq!(general.source, ClassificationSource::Model);
    }

    #[test]
    fn test_verdict_confidence_is_scaled_up() {
        let config = ModelConfig::default();

        let verdict = verdict_from_scores(&one_hot(10, 0.5), &config).unwrap();

        assert!(verdict.confidence > 0.5);
        assert!(verdict.confidence <= config.confidence_cap);
    }

    #[test]
    fn test_verdict_below_min_confidence_is_none() {
        let config = ModelConfig {
            min_confidence: 0.5,
            ..ModelConfig::default()
        };

        assert!(verdict_from_scores(&one_hot(10, 0.3), &config).is_none());
        assert!(verdict_from_scores(&[], &config).is_none());
    }

    #[test]
    fn test_verdict_from_logits() {
        let config = ModelConfig::default();
        let mut logits = vec![0.0; 1000];
        logits[720] = 12.0;

        let verdict = verdict_from_scores(&logits, &config).unwrap();

        assert_eq!(verdict.bucket, Bucket::Electronic);
    }

    #[tokio::test]
    async fn test_loader_missing_file_is_error() {
        let config = ModelConfig {
            source: "./does/not/exist.onnx".to_string(),
            ..ModelConfig::default()
        };
        let logger = Arc::new(LoggerConsole::new(FixedOffset::east_opt(0).unwrap(), false));
        let loader = TractOnnxModelLoader::new(config, logger);

        assert!(loader.load().await.is_err());
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = ImageClassifierTractOnnx::from_bytes(ModelConfig::default(), b"not onnx");
        assert!(result.is_err());
    }
}
