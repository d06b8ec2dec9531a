//! Text detection client for uploaded plate images.
//!
//! Thin wrapper over the Rekognition `DetectText` operation. The stage only
//! needs the detected strings in detection order; geometry and confidence
//! are dropped here.

use crate::config::OcrConfig;
use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_sdk_rekognition::config::Builder as RekognitionConfigBuilder;
use aws_sdk_rekognition::types::{Image, S3Object};
use aws_sdk_rekognition::Client as RekognitionClient;
use tracing::{debug, info, instrument};

/// OCR collaborator handle, created once per stage lifetime
pub struct TextDetector {
    client: RekognitionClient,
}

impl TextDetector {
    /// Create a new text detector client
    pub async fn new(config: &OcrConfig) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = RekognitionConfigBuilder::from(&aws_config);

        if let Some(ref endpoint_url) = config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        let client = RekognitionClient::from_conf(builder.build());

        info!(region = %config.region, "Text detector initialized");

        Self { client }
    }

    /// Detect text in a stored image, returning the raw text blocks in
    /// detection order
    #[instrument(skip(self), fields(bucket = %bucket, key = %key))]
    pub async fn detect_text(&self, bucket: &str, key: &str) -> Result<Vec<String>> {
        let image = Image::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(bucket)
                    .name(key)
                    .build(),
            )
            .build();

        let response = self
            .client
            .detect_text()
            .image(image)
            .send()
            .await
            .context("Text detection request failed")?;

        let blocks: Vec<String> = response
            .text_detections()
            .iter()
            .filter_map(|d| d.detected_text().map(String::from))
            .collect();

        debug!(count = blocks.len(), "Detected text blocks");

        Ok(blocks)
    }
}
