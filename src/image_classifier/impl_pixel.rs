use crate::config::PixelConfig;
use crate::image_classifier::interface::{ClassifierTier, Verdict};
use crate::waste::bucket::Bucket;
use crate::waste::result::ClassificationSource;
use image::{imageops, DynamicImage};

/// Counts of sampled pixels falling into each coarse color band.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PixelStats {
    pub total: u32,
    /// yellow, brown or green
    pub organic: u32,
    /// bright or metallic
    pub shiny: u32,
    pub dark: u32,
    brightness_sum: f64,
}

impl PixelStats {
    fn ratio(&self, count: u32) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        count as f32 / self.total as f32
    }

    pub fn organic_ratio(&self) -> f32 {
        self.ratio(self.organic)
    }

    pub fn shiny_ratio(&self) -> f32 {
        self.ratio(self.shiny)
    }

    pub fn dark_ratio(&self) -> f32 {
        self.ratio(self.dark)
    }

    pub fn avg_brightness(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.brightness_sum / self.total as f64) as f32
    }

    fn add(&mut self, r: u8, g: u8, b: u8) {
        let (r, g, b) = (r as i32, g as i32, b as i32);
        let brightness = (r + g + b) as f32 / 3.0;
        let spread = r.max(g).max(b) - r.min(g).min(b);

        let is_yellow = r > 150 && g > 150 && b < 100;
        let is_brown = r > 80 && r < 180 && g > 40 && g < 130 && b < 90 && r > g;
        let is_green = g > 100 && g > r + 20 && g > b + 20;
        let is_bright = r > 180 && g > 180 && b > 180;
        let is_metallic = spread < 25 && (100.0..=230.0).contains(&brightness);
        let is_dark = brightness < 50.0;

        self.total += 1;
        self.organic += (is_yellow || is_brown || is_green) as u32;
        self.shiny += (is_bright || is_metallic) as u32;
        self.dark += is_dark as u32;
        self.brightness_sum += brightness as f64;
    }
}

/// Downsamples to `sample_size` square and scans every pixel. `None` for a
/// zero-area image.
pub fn sample_stats(image: &DynamicImage, sample_size: u32) -> Option<PixelStats> {
    if image.width() == 0 || image.height() == 0 || sample_size == 0 {
        return None;
    }

    let sampled = image
        .resize_exact(sample_size, sample_size, imageops::FilterType::Triangle)
        .to_rgb8();

    let mut stats = PixelStats::default();
    for pixel in sampled.pixels() {
        stats.add(pixel[0], pixel[1], pixel[2]);
    }

    Some(stats)
}

pub fn decide(stats: &PixelStats, config: &PixelConfig) -> Bucket {
    if stats.organic_ratio() > config.organic_ratio {
        Bucket::Organic
    } else if stats.shiny_ratio() > config.shiny_ratio {
        Bucket::Recyclable
    } else if stats.dark_ratio() > config.dark_ratio
        && stats.avg_brightness() < config.dark_max_avg_brightness
    {
        Bucket::Electronic
    } else {
        Bucket::Organic
    }
}

pub struct ImageClassifierPixel {
    config: PixelConfig,
    randomize: bool,
}

impl ImageClassifierPixel {
    pub fn new(config: PixelConfig, randomize: bool) -> Self {
        Self { config, randomize }
    }

    fn confidence(&self) -> f32 {
        if self.randomize && self.config.confidence_jitter > 0.0 {
            self.config.confidence + rand::random::<f32>() * self.config.confidence_jitter
        } else {
            self.config.confidence
        }
    }
}

impl ClassifierTier for ImageClassifierPixel {
    fn name(&self) -> &'static str {
        "pixel_heuristic"
    }

    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Option<Verdict>, Box<dyn std::error::Error + Send + Sync>> {
        let Some(stats) = sample_stats(image, self.config.sample_size) else {
            return Ok(None);
        };

        Ok(Some(Verdict {
            bucket: decide(&stats, &self.config),
            confidence: self.confidence(),
            source: ClassificationSource::PixelHeuristic,
        }))
    }
}
