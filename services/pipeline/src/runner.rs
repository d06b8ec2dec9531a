//! Generic stage runner: the receive/process/acknowledge loop shared by
//! every pipeline stage.
//!
//! The runner models a long-lived worker over a leased-message queue. On a
//! fixed poll interval it receives a batch from the stage's input queue and
//! processes messages sequentially in receive order. Successful and
//! terminally failed messages are deleted; transiently failed messages are
//! left unacknowledged so the transport redelivers them after the queue's
//! visibility timeout. The runner keeps no retry state of its own.

use crate::queue::{QueueClient, ReceivedMessage};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

/// Failure modes a stage processor can report for one message
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// Malformed input; the message is logged and acknowledged, never retried
    #[error("terminal: {0}")]
    Terminal(#[source] anyhow::Error),

    /// Collaborator unavailable; the message is left for transport redelivery
    #[error("transient: {0}")]
    Transient(#[source] anyhow::Error),
}

impl ProcessingError {
    pub fn terminal(err: impl Into<anyhow::Error>) -> Self {
        Self::Terminal(err.into())
    }

    pub fn transient(err: impl Into<anyhow::Error>) -> Self {
        Self::Transient(err.into())
    }
}

/// Handler trait for one stage's per-message processing
#[async_trait::async_trait]
pub trait MessageProcessor: Send + Sync {
    /// Process a single message. Publishing to the stage's output queue, if
    /// any, happens inside this call; the runner only acknowledges.
    async fn process(&self, message: &ReceivedMessage) -> Result<(), ProcessingError>;
}

/// Poll-process-acknowledge loop bound to one input queue
pub struct StageRunner {
    stage: &'static str,
    client: Arc<QueueClient>,
    input_queue: String,
    shutdown_tx: watch::Sender<bool>,
}

impl StageRunner {
    /// Create a runner for the named stage reading from `input_queue`
    pub fn new(
        stage: &'static str,
        client: Arc<QueueClient>,
        input_queue: impl Into<String>,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            stage,
            client,
            input_queue: input_queue.into(),
            shutdown_tx,
        }
    }

    /// Signal the runner to stop after the in-flight message completes
    pub fn shutdown(&self) {
        info!(stage = self.stage, "Signaling stage shutdown");
        let _ = self.shutdown_tx.send(true);
    }

    /// Get a handle that can signal shutdown from another task
    pub fn shutdown_handle(&self) -> watch::Sender<bool> {
        self.shutdown_tx.clone()
    }

    /// Run the stage loop until shutdown is signaled
    #[instrument(skip(self, processor), fields(stage = self.stage, queue = %self.input_queue))]
    pub async fn run<P: MessageProcessor>(&self, processor: Arc<P>) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let poll_interval = self.client.config().poll_interval();

        info!("Starting stage poll loop");

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            match self.client.receive(&self.input_queue).await {
                Ok(batch) => {
                    for message in batch {
                        // Cancellation is cooperative between messages,
                        // never mid-message.
                        if *shutdown_rx.borrow() {
                            info!("Shutdown observed between messages");
                            return;
                        }
                        self.handle_message(processor.as_ref(), &message).await;
                    }
                }
                Err(e) => {
                    // Queue unreachable: retry on the next poll tick.
                    error!(error = %e, "Failed to receive from input queue");
                }
            }

            tokio::select! {
                _ = shutdown_rx.changed() => {
                    break;
                }
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }

        info!("Stage poll loop stopped");
    }

    /// Process one message and acknowledge it according to the outcome
    async fn handle_message<P: MessageProcessor>(
        &self,
        processor: &P,
        message: &ReceivedMessage,
    ) {
        match processor.process(message).await {
            Ok(()) => {
                self.acknowledge(message).await;
            }
            Err(ProcessingError::Terminal(e)) => {
                error!(
                    message_id = %message.message_id,
                    error = %e,
                    "Message failed terminally; acknowledging without retry"
                );
                self.acknowledge(message).await;
            }
            Err(ProcessingError::Transient(e)) => {
                warn!(
                    message_id = %message.message_id,
                    error = %e,
                    "Message failed transiently; leaving for redelivery"
                );
            }
        }
    }

    /// Delete the message from the input queue
    async fn acknowledge(&self, message: &ReceivedMessage) {
        if let Err(e) = self
            .client
            .delete(&self.input_queue, &message.receipt_handle)
            .await
        {
            // The message will come back after the visibility timeout; the
            // stage must tolerate the duplicate (at-least-once delivery).
            warn!(
                message_id = %message.message_id,
                error = %e,
                "Failed to delete acknowledged message"
            );
        }
    }
}
