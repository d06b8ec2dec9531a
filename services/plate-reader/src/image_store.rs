//! Object-storage access for uploaded plate images.
//!
//! Reads the per-image violation metadata attached at upload time, and
//! relocates images that fail the jurisdiction check into the
//! manual-review bucket.

use crate::config::StorageConfig;
use crate::ticket::ViolationMetadata;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::Client as S3Client;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Errors that can occur against the image store
#[derive(Error, Debug)]
pub enum ImageStoreError {
    /// A required metadata key was absent from the uploaded object; the
    /// upload was malformed at the source
    #[error("Uploaded object {key} is missing metadata key {meta_key:?}")]
    MissingMetadata {
        key: String,
        meta_key: &'static str,
    },

    /// The storage service could not be reached or refused the request
    #[error("Storage request failed for {key}: {message}")]
    Storage { key: String, message: String },
}

/// S3-backed store for uploaded plate images
pub struct ImageStore {
    client: S3Client,
    review_bucket: String,
}

impl ImageStore {
    /// Create a new image store client
    pub async fn new(config: &StorageConfig) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut s3_config_builder = S3ConfigBuilder::from(&aws_config);

        // Configure custom endpoint for MinIO/LocalStack
        if let Some(ref endpoint_url) = config.endpoint_url {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint_url);
        }

        // Force path-style access for MinIO compatibility
        if config.force_path_style {
            s3_config_builder = s3_config_builder.force_path_style(true);
        }

        let client = S3Client::from_conf(s3_config_builder.build());

        info!(
            review_bucket = %config.review_bucket,
            region = %config.region,
            "Image store initialized"
        );

        Self {
            client,
            review_bucket: config.review_bucket.clone(),
        }
    }

    /// Read the violation metadata attached to an uploaded image.
    ///
    /// The keys `violation`, `location` and `date` are set by the uploader
    /// as object user metadata and are required; a missing key means the
    /// upload was malformed.
    #[instrument(skip(self), fields(bucket = %bucket, key = %key))]
    pub async fn violation_metadata(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<ViolationMetadata, ImageStoreError> {
        let response = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ImageStoreError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let metadata = response.metadata();
        let get = |meta_key: &'static str| -> Result<String, ImageStoreError> {
            metadata
                .and_then(|m| m.get(meta_key))
                .cloned()
                .ok_or(ImageStoreError::MissingMetadata {
                    key: key.to_string(),
                    meta_key,
                })
        };

        let violation = get("violation")?;
        let location = get("location")?;
        let date = get("date")?;

        debug!(violation = %violation, "Read violation metadata");

        Ok(ViolationMetadata {
            violation,
            location,
            date,
        })
    }

    /// Copy an image into the manual-review bucket under its original key.
    ///
    /// The source object is copied, not moved; the upload bucket keeps its
    /// copy.
    #[instrument(skip(self), fields(bucket = %bucket, key = %key))]
    pub async fn copy_to_review(&self, bucket: &str, key: &str) -> Result<(), ImageStoreError> {
        self.client
            .copy_object()
            .copy_source(format!("{}/{}", bucket, key))
            .bucket(&self.review_bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ImageStoreError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        info!(
            review_bucket = %self.review_bucket,
            "Image relocated for manual review"
        );

        Ok(())
    }
}
