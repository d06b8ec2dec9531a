//! Queue configuration for the Platewatch pipeline.
//!
//! This module provides configuration structures and utilities for connecting
//! to the SQS queue transport shared by all pipeline stages.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Queue URLs for the Platewatch pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueUrls {
    /// Queue for image upload notifications (stage 1 input)
    #[serde(default = "default_uploads_queue")]
    pub uploads: String,
    /// Queue for ticket messages (stage 1 output, stage 2 input)
    #[serde(default = "default_tickets_queue")]
    pub tickets: String,
    /// Queue for enriched violation messages (stage 2 output, stage 3 input)
    #[serde(default = "default_violations_queue")]
    pub violations: String,
}

fn default_uploads_queue() -> String {
    "http://localhost:4566/000000000000/platewatch-uploads".to_string()
}

fn default_tickets_queue() -> String {
    "http://localhost:4566/000000000000/platewatch-tickets".to_string()
}

fn default_violations_queue() -> String {
    "http://localhost:4566/000000000000/platewatch-violations".to_string()
}

impl Default for QueueUrls {
    fn default() -> Self {
        Self {
            uploads: default_uploads_queue(),
            tickets: default_tickets_queue(),
            violations: default_violations_queue(),
        }
    }
}

/// Receive-side settings shared by every stage's poll loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveConfig {
    /// Maximum messages fetched per receive call (SQS allows 1-10)
    #[serde(default = "default_max_messages")]
    pub max_messages: i32,
    /// Long-poll wait in seconds
    #[serde(default = "default_wait_time_seconds")]
    pub wait_time_seconds: i32,
    /// Delay between poll cycles in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_max_messages() -> i32 {
    10
}

fn default_wait_time_seconds() -> i32 {
    5
}

fn default_poll_interval_ms() -> u64 {
    5000
}

impl Default for ReceiveConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            wait_time_seconds: default_wait_time_seconds(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Main queue configuration for the Platewatch pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// AWS region hosting the queues
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL (for LocalStack/ElasticMQ)
    pub endpoint_url: Option<String>,
    /// Queue URLs
    #[serde(default)]
    pub queues: QueueUrls,
    /// Receive settings
    #[serde(default)]
    pub receive: ReceiveConfig,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
            queues: QueueUrls::default(),
            receive: ReceiveConfig::default(),
        }
    }
}

impl QueueConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(region) = std::env::var("PLATEWATCH_QUEUE_REGION") {
            config.region = region;
        }
        if let Ok(endpoint) = std::env::var("PLATEWATCH_QUEUE_ENDPOINT") {
            config.endpoint_url = Some(endpoint);
        }
        if let Ok(url) = std::env::var("PLATEWATCH_UPLOADS_QUEUE_URL") {
            config.queues.uploads = url;
        }
        if let Ok(url) = std::env::var("PLATEWATCH_TICKETS_QUEUE_URL") {
            config.queues.tickets = url;
        }
        if let Ok(url) = std::env::var("PLATEWATCH_VIOLATIONS_QUEUE_URL") {
            config.queues.violations = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get the poll interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.receive.poll_interval_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.is_empty() {
            return Err(ConfigError::MissingRequired("region".to_string()));
        }

        if !(1..=10).contains(&self.receive.max_messages) {
            return Err(ConfigError::InvalidValue {
                key: "receive.max_messages".to_string(),
                message: "must be between 1 and 10".to_string(),
            });
        }

        if !(0..=20).contains(&self.receive.wait_time_seconds) {
            return Err(ConfigError::InvalidValue {
                key: "receive.wait_time_seconds".to_string(),
                message: "must be between 0 and 20".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QueueConfig::default();
        assert_eq!(config.region, "us-east-1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_messages_bounds() {
        let mut config = QueueConfig::default();
        config.receive.max_messages = 11;
        assert!(config.validate().is_err());

        config.receive.max_messages = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_poll_interval() {
        let mut config = QueueConfig::default();
        config.receive.poll_interval_ms = 1500;
        assert_eq!(config.poll_interval(), Duration::from_millis(1500));
    }
}
