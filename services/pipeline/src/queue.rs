//! SQS queue client wrapper for the Platewatch pipeline.
//!
//! This module provides a high-level, type-safe interface for sending and
//! receiving queue messages with JSON payloads. One client is created per
//! stage lifetime and shared; the underlying SDK client pools connections.

use crate::config::QueueConfig;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::config::Builder as SqsConfigBuilder;
use aws_sdk_sqs::Client as SqsClient;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during queue operations
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to serialize message: {0}")]
    SerializationError(String),

    #[error("Failed to deserialize message: {0}")]
    DeserializationError(String),

    #[error("Failed to send message to {queue}: {message}")]
    SendError { queue: String, message: String },

    #[error("Failed to receive messages from {queue}: {message}")]
    ReceiveError { queue: String, message: String },

    #[error("Failed to delete message from {queue}: {message}")]
    DeleteError { queue: String, message: String },
}

/// A message received from a queue, with the lease handle needed to
/// acknowledge it
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Transport-assigned message ID
    pub message_id: String,
    /// Receipt handle for deleting/acknowledging this delivery
    pub receipt_handle: String,
    /// Raw message body
    pub body: String,
}

impl ReceivedMessage {
    /// Deserialize the body as JSON
    pub fn decode_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, QueueError> {
        serde_json::from_str(&self.body)
            .map_err(|e| QueueError::DeserializationError(e.to_string()))
    }
}

/// High-level SQS client wrapper shared by every pipeline stage
pub struct QueueClient {
    client: SqsClient,
    config: QueueConfig,
}

impl QueueClient {
    /// Create a new queue client with the given configuration
    pub async fn new(config: QueueConfig) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut sqs_config_builder = SqsConfigBuilder::from(&aws_config);

        // Configure custom endpoint for LocalStack/ElasticMQ
        if let Some(ref endpoint_url) = config.endpoint_url {
            sqs_config_builder = sqs_config_builder.endpoint_url(endpoint_url);
        }

        let client = SqsClient::from_conf(sqs_config_builder.build());

        info!(region = %config.region, "Queue client initialized");

        Self { client, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Serialize a value as JSON and send it to the given queue
    pub async fn send_json<T: serde::Serialize>(
        &self,
        queue_url: &str,
        message: &T,
    ) -> Result<String, QueueError> {
        let body = serde_json::to_string(message)
            .map_err(|e| QueueError::SerializationError(e.to_string()))?;

        debug!(
            queue = %queue_url,
            size_bytes = body.len(),
            "Sending message"
        );

        let response = self
            .client
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| QueueError::SendError {
                queue: queue_url.to_string(),
                message: e.to_string(),
            })?;

        let message_id = response.message_id().unwrap_or_default().to_string();
        debug!(queue = %queue_url, message_id = %message_id, "Message sent");

        Ok(message_id)
    }

    /// Receive up to the configured batch of messages from the given queue
    ///
    /// Uses long polling with the configured wait time. Received messages
    /// are leased to this consumer until deleted or until the queue's
    /// visibility timeout lapses.
    pub async fn receive(&self, queue_url: &str) -> Result<Vec<ReceivedMessage>, QueueError> {
        let response = self
            .client
            .receive_message()
            .queue_url(queue_url)
            .max_number_of_messages(self.config.receive.max_messages)
            .wait_time_seconds(self.config.receive.wait_time_seconds)
            .send()
            .await
            .map_err(|e| QueueError::ReceiveError {
                queue: queue_url.to_string(),
                message: e.to_string(),
            })?;

        let messages = response
            .messages()
            .iter()
            .filter_map(|m| {
                let receipt_handle = m.receipt_handle()?.to_string();
                Some(ReceivedMessage {
                    message_id: m.message_id().unwrap_or_default().to_string(),
                    receipt_handle,
                    body: m.body().unwrap_or_default().to_string(),
                })
            })
            .collect::<Vec<_>>();

        if !messages.is_empty() {
            debug!(
                queue = %queue_url,
                count = messages.len(),
                "Received messages"
            );
        }

        Ok(messages)
    }

    /// Delete (acknowledge) a received message so it is never redelivered
    pub async fn delete(
        &self,
        queue_url: &str,
        receipt_handle: &str,
    ) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| QueueError::DeleteError {
                queue: queue_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}
