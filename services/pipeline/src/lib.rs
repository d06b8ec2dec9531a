//! Platewatch Pipeline - queue plumbing for the traffic-violation ticketing
//! system
//!
//! This library provides the pieces shared by the three Platewatch stage
//! services:
//!
//! - Queue configuration and a pooled SQS client wrapper
//! - The wire message types carried on the ticket and violation queues
//! - The generic receive/process/acknowledge stage runner
//!
//! # Example
//!
//! ```rust,no_run
//! use platewatch_pipeline::{QueueClient, QueueConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = QueueConfig::from_env()?;
//!     let client = QueueClient::new(config).await;
//!
//!     let tickets_queue = client.config().queues.tickets.clone();
//!     let batch = client.receive(&tickets_queue).await?;
//!     println!("received {} messages", batch.len());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod messages;
pub mod queue;
pub mod runner;

// Re-export main types
pub use config::{ConfigError, QueueConfig, QueueUrls, ReceiveConfig};
pub use messages::{Ticket, TrafficViolation, UploadEvent};
pub use queue::{QueueClient, QueueError, ReceivedMessage};
pub use runner::{MessageProcessor, ProcessingError, StageRunner};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::QueueConfig;
    pub use crate::messages::{Ticket, TrafficViolation, UploadEvent};
    pub use crate::queue::{QueueClient, QueueError, ReceivedMessage};
    pub use crate::runner::{MessageProcessor, ProcessingError, StageRunner};
}
