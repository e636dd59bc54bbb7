use crate::waste::bucket::Bucket;
use crate::waste::result::ClassificationSource;
use async_trait::async_trait;
use image::DynamicImage;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub bucket: Bucket,
    pub confidence: f32,
    pub source: ClassificationSource,
}

/// One step of the classifier chain. `Ok(None)` means the tier has no answer
/// for this image and the next tier should be tried.
pub trait ClassifierTier: Send + Sync {
    fn name(&self) -> &'static str;
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Option<Verdict>, Box<dyn std::error::Error + Send + Sync>>;
}

#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(
        &self,
    ) -> Result<Arc<dyn ClassifierTier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>;
}
