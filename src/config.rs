use crate::image_classifier::models::model_config::ModelConfig;
use crate::waste::bucket::Bucket;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_file_bytes: u64,
    pub accepted_mime_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 5 * 1024 * 1024,
            accepted_mime_prefix: "image/".to_string(),
        }
    }
}

/// Color-band thresholds for the pixel heuristic. Ratios are over sampled pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PixelConfig {
    pub sample_size: u32,
    pub organic_ratio: f32,
    pub shiny_ratio: f32,
    pub dark_ratio: f32,
    pub dark_max_avg_brightness: f32,
    pub confidence: f32,
    pub confidence_jitter: f32,
}

impl Default for PixelConfig {
    fn default() -> Self {
        Self {
            sample_size: 64,
            organic_ratio: 0.3,
            shiny_ratio: 0.4,
            dark_ratio: 0.5,
            dark_max_avg_brightness: 60.0,
            confidence: 0.75,
            confidence_jitter: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResultConfig {
    pub items_per_result: usize,
    pub randomize: bool,
    pub fallback_bucket: Bucket,
    pub fallback_confidence: f32,
}

impl Default for ResultConfig {
    fn default() -> Self {
        Self {
            items_per_result: 3,
            randomize: false,
            fallback_bucket: Bucket::Organic,
            fallback_confidence: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger_utc_offset_hours: i32,
    pub logger_verbose: bool,
    pub upload: UploadConfig,
    pub model: ModelConfig,
    pub pixel: PixelConfig,
    pub result: ResultConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_utc_offset_hours: 0,
            logger_verbose: false,
            upload: UploadConfig::default(),
            model: ModelConfig::default(),
            pixel: PixelConfig::default(),
            result: ResultConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn logger_timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.logger_utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }
}
