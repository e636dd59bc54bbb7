use crate::config::Config;
use crate::image_classifier::impl_default::ImageClassifierDefault;
use crate::image_classifier::impl_pixel::ImageClassifierPixel;
use crate::image_classifier::impl_tract_onnx::TractOnnxModelLoader;
use crate::image_classifier::interface::{ClassifierTier, ModelLoader, Verdict};
use crate::library::logger::interface::Logger;
use crate::waste::catalog::build_result;
use crate::waste::result::ClassificationResult;
use image::DynamicImage;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    Disabled,
    NotLoaded,
    Loaded,
    Unavailable,
}

/// Owns the classifier chain: optional model tier, pixel heuristic, fixed
/// default. The model is loaded at most once per service and the outcome,
/// success or failure, is kept for the service's lifetime.
pub struct WasteSorter {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    model_loader: Option<Arc<dyn ModelLoader + Send + Sync>>,
    model: OnceCell<Option<Arc<dyn ClassifierTier + Send + Sync>>>,
    pixel: Arc<dyn ClassifierTier + Send + Sync>,
    fallback: Arc<ImageClassifierDefault>,
}

impl WasteSorter {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        model_loader: Option<Arc<dyn ModelLoader + Send + Sync>>,
    ) -> Self {
        let pixel = Arc::new(ImageClassifierPixel::new(
            config.pixel.clone(),
            config.result.randomize,
        ));
        let fallback = Arc::new(ImageClassifierDefault::new(
            config.result.fallback_bucket,
            config.result.fallback_confidence,
        ));

        Self {
            logger: logger.with_namespace("waste_sorter"),
            config,
            model_loader,
            model: OnceCell::new(),
            pixel,
            fallback,
        }
    }

    pub fn from_config(config: Config, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let model_loader: Option<Arc<dyn ModelLoader + Send + Sync>> = if config.model.enabled {
            Some(Arc::new(TractOnnxModelLoader::new(
                config.model.clone(),
                logger.clone(),
            )))
        } else {
            None
        };

        Self::new(config, logger, model_loader)
    }

    /// Loads the model tier now instead of on the first `classify`.
    pub async fn init(&self) -> ModelStatus {
        self.model_tier().await;
        self.model_status()
    }

    pub fn model_status(&self) -> ModelStatus {
        if self.model_loader.is_none() {
            return ModelStatus::Disabled;
        }

        match self.model.get() {
            None => ModelStatus::NotLoaded,
            Some(Some(_)) => ModelStatus::Loaded,
            Some(None) => ModelStatus::Unavailable,
        }
    }

    async fn model_tier(&self) -> Option<Arc<dyn ClassifierTier + Send + Sync>> {
        let loader = self.model_loader.as_ref()?;

        self.model
            .get_or_init(|| async {
                match loader.load().await {
                    Ok(tier) => Some(tier),
                    Err(e) => {
                        let _ = self.logger.warn(&format!(
                            "Model unavailable, using pixel heuristic for this session: {}",
                            e
                        ));
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Never fails. Errors inside any tier degrade to the next one.
    pub async fn classify(&self, image: DynamicImage) -> ClassificationResult {
        let mut tiers: Vec<Arc<dyn ClassifierTier + Send + Sync>> = Vec::with_capacity(3);
        if let Some(model) = self.model_tier().await {
            tiers.push(model);
        }
        tiers.push(self.pixel.clone());
        tiers.push(self.fallback.clone());

        let logger = self.logger.clone();
        let outcome =
            tokio::task::spawn_blocking(move || run_chain(&tiers, &image, logger.as_ref())).await;

        let verdict = match outcome {
            Ok(Some(verdict)) => verdict,
            Ok(None) => self.fallback.verdict(),
            Err(e) => {
                let _ = self
                    .logger
                    .warn(&format!("Classification task failed: {}", e));
                self.fallback.verdict()
            }
        };

        self.to_result(verdict)
    }

    /// Decodes raw file bytes first. Empty or undecodable input yields the
    /// fixed default bucket.
    pub async fn classify_bytes(&self, bytes: &[u8]) -> ClassificationResult {
        match image::load_from_memory(bytes) {
            Ok(image) => self.classify(image).await,
            Err(e) => {
                let _ = self
                    .logger
                    .warn(&format!("Could not decode image ({} bytes): {}", bytes.len(), e));
                self.to_result(self.fallback.verdict())
            }
        }
    }

    fn to_result(&self, verdict: Verdict) -> ClassificationResult {
        let result = build_result(
            verdict.bucket,
            verdict.confidence,
            verdict.source,
            self.config.result.items_per_result,
            self.config.result.randomize,
        );

        let _ = self.logger.info(&format!(
            "Classified as {} ({}%) via {:?}",
            result.category,
            result.confidence_percent(),
            result.source
        ));

        result
    }
}

fn run_chain(
    tiers: &[Arc<dyn ClassifierTier + Send + Sync>],
    image: &DynamicImage,
    logger: &(dyn Logger + Send + Sync),
) -> Option<Verdict> {
    for tier in tiers {
        match catch_unwind(AssertUnwindSafe(|| tier.classify(image))) {
            Ok(Ok(Some(verdict))) => {
                let _ = logger.debug(&format!("{} tier answered {:?}", tier.name(), verdict));
                return Some(verdict);
            }
            Ok(Ok(None)) => {
                let _ = logger.debug(&format!("{} tier had no answer", tier.name()));
            }
            Ok(Err(e)) => {
                let _ = logger.warn(&format!("{} tier failed: {}", tier.name(), e));
            }
            Err(_) => {
                let _ = logger.warn(&format!("{} tier panicked", tier.name()));
            }
        }
    }

    None
}
