//! Translation collaborator interface.
//!
//! The composer only depends on the [`Translator`] trait; the production
//! implementation wraps the Translate service client, created once per
//! stage lifetime.

use crate::config::TranslationConfig;
use aws_config::BehaviorVersion;
use aws_sdk_translate::config::Builder as TranslateConfigBuilder;
use aws_sdk_translate::Client as TranslateClient;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// The translation collaborator could not produce a translation
#[derive(Error, Debug)]
#[error("Translation failed: {0}")]
pub struct TranslateError(pub String);

/// Seam for translating notification text into a target language
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate English `text` into the language identified by
    /// `target_code`
    async fn translate(&self, text: &str, target_code: &str) -> Result<String, TranslateError>;
}

/// Production translator backed by the Translate service
pub struct AwsTranslator {
    client: TranslateClient,
}

impl AwsTranslator {
    /// Create a new translator client
    pub async fn new(config: &TranslationConfig) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = TranslateConfigBuilder::from(&aws_config);

        if let Some(ref endpoint_url) = config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        let client = TranslateClient::from_conf(builder.build());

        info!(region = %config.region, "Translator initialized");

        Self { client }
    }
}

#[async_trait::async_trait]
impl Translator for AwsTranslator {
    #[instrument(skip(self, text), fields(target = %target_code))]
    async fn translate(&self, text: &str, target_code: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .translate_text()
            .text(text)
            .source_language_code("en")
            .target_language_code(target_code)
            .send()
            .await
            .map_err(|e| TranslateError(e.to_string()))?;

        debug!("Translation completed");

        Ok(response.translated_text().to_string())
    }
}
