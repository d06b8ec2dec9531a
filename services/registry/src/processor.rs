//! Stage 2 message processing: ticket in, enriched violation out.

use crate::enricher::enrich;
use crate::store::RegistryStore;
use platewatch_pipeline::{
    MessageProcessor, ProcessingError, QueueClient, ReceivedMessage, Ticket,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Processes ticket messages: registry lookup, enrichment, and publication
/// to the violation queue
pub struct TicketProcessor {
    store: Arc<RegistryStore>,
    queue: Arc<QueueClient>,
    violations_queue: String,
}

impl TicketProcessor {
    pub fn new(store: Arc<RegistryStore>, queue: Arc<QueueClient>) -> Self {
        let violations_queue = queue.config().queues.violations.clone();
        Self {
            store,
            queue,
            violations_queue,
        }
    }
}

#[async_trait::async_trait]
impl MessageProcessor for TicketProcessor {
    #[instrument(skip(self, message), fields(message_id = %message.message_id))]
    async fn process(&self, message: &ReceivedMessage) -> Result<(), ProcessingError> {
        let ticket: Ticket = message
            .decode_json()
            .map_err(ProcessingError::terminal)?;

        // A store failure is transient; an absent record is a normal
        // outcome and flows through as empty owner fields.
        let record = self
            .store
            .find_vehicle(&ticket.plate)
            .await
            .map_err(ProcessingError::transient)?;

        let registered = record.is_some();
        let violation = enrich(&ticket, record);

        self.queue
            .send_json(&self.violations_queue, &violation)
            .await
            .map_err(ProcessingError::transient)?;

        info!(
            plate = %violation.plate,
            registered,
            "Enriched violation published"
        );

        Ok(())
    }
}
