use crate::image_classifier::interface::{ClassifierTier, ModelLoader, Verdict};
use async_trait::async_trait;
use image::DynamicImage;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Verdict(Verdict),
    Unavailable,
    Error(String),
    Panic,
}

pub struct ImageClassifierFake {
    outcome: FakeOutcome,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClassifierTier for ImageClassifierFake {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn classify(
        &self,
        _image: &DynamicImage,
    ) -> Result<Option<Verdict>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            FakeOutcome::Verdict(verdict) => Ok(Some(verdict.clone())),
            FakeOutcome::Unavailable => Ok(None),
            FakeOutcome::Error(message) => Err(message.clone().into()),
            FakeOutcome::Panic => panic!("fake classifier panicked"),
        }
    }
}

pub struct ModelLoaderFake {
    tier: Option<Arc<dyn ClassifierTier + Send + Sync>>,
    delay: Duration,
    loads: AtomicUsize,
}

impl ModelLoaderFake {
    pub fn succeeding(tier: Arc<dyn ClassifierTier + Send + Sync>, delay: Duration) -> Self {
        Self {
            tier: Some(tier),
            delay,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn failing(delay: Duration) -> Self {
        Self {
            tier: None,
            delay,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelLoader for ModelLoaderFake {
    async fn load(
        &self,
    ) -> Result<Arc<dyn ClassifierTier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>
    {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        match &self.tier {
            Some(tier) => Ok(tier.clone()),
            None => Err("network unreachable".into()),
        }
    }
}
