use platewatch_pipeline::QueueConfig;
use serde::Deserialize;

/// Main configuration for the plate-reader stage
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,
    /// Queue transport configuration
    #[serde(default)]
    pub queue: QueueConfig,
    /// Object storage configuration
    pub storage: StorageConfig,
    /// OCR collaborator configuration
    #[serde(default)]
    pub ocr: OcrConfig,
    /// Plate extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Service name for logging
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL (for MinIO, LocalStack, etc.)
    pub endpoint_url: Option<String>,
    /// Force path-style access (required for MinIO)
    #[serde(default)]
    pub force_path_style: bool,
    /// Bucket receiving images that need human triage
    #[serde(default = "default_review_bucket")]
    pub review_bucket: String,
}

/// OCR collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// AWS region for the text-detection service
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL
    pub endpoint_url: Option<String>,
}

/// Plate extraction configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Exact text confirming an image originates from the target region
    #[serde(default = "default_jurisdiction_marker")]
    pub jurisdiction_marker: String,
}

fn default_service_name() -> String {
    "plate-reader".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_review_bucket() -> String {
    "platewatch-manual-review".to_string()
}

fn default_jurisdiction_marker() -> String {
    "California".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            jurisdiction_marker: default_jurisdiction_marker(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config files
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .set_default("storage.review_bucket", default_review_bucket())?
            .add_source(config::File::with_name("config/plate-reader").required(false))
            .add_source(config::File::with_name("/etc/platewatch/plate-reader").required(false))
            // READER__STORAGE__REVIEW_BUCKET -> storage.review_bucket
            .add_source(
                config::Environment::with_prefix("READER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(default_jurisdiction_marker(), "California");
        assert_eq!(default_review_bucket(), "platewatch-manual-review");
    }
}
