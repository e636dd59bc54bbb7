use crate::image_classifier::interface::{ClassifierTier, Verdict};
use crate::waste::bucket::Bucket;
use crate::waste::result::ClassificationSource;
use image::DynamicImage;

/// Last link of the chain. Always answers with a fixed low-confidence bucket.
pub struct ImageClassifierDefault {
    bucket: Bucket,
    confidence: f32,
}

impl ImageClassifierDefault {
    pub fn new(bucket: Bucket, confidence: f32) -> Self {
        Self { bucket, confidence }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict {
            bucket: self.bucket,
            confidence: self.confidence,
            source: ClassificationSource::Fallback,
        }
    }
}

impl ClassifierTier for ImageClassifierDefault {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn classify(
        &self,
        _image: &DynamicImage,
    ) -> Result<Option<Verdict>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Some(self.verdict()))
    }
}
