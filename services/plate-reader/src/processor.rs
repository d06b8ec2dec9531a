//! Stage 1 message processing: upload event in, ticket out.

use crate::extractor::{extract_plate, PlateScan, RejectReason};
use crate::image_store::{ImageStore, ImageStoreError};
use crate::text_detector::TextDetector;
use crate::ticket::build_ticket;
use anyhow::anyhow;
use platewatch_pipeline::{
    MessageProcessor, ProcessingError, QueueClient, ReceivedMessage, UploadEvent,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Processes upload notifications: OCR, plate extraction, ticket building,
/// and publication to the ticket queue
pub struct UploadProcessor {
    detector: TextDetector,
    image_store: ImageStore,
    queue: Arc<QueueClient>,
    tickets_queue: String,
    jurisdiction_marker: String,
}

impl UploadProcessor {
    pub fn new(
        detector: TextDetector,
        image_store: ImageStore,
        queue: Arc<QueueClient>,
        jurisdiction_marker: String,
    ) -> Self {
        let tickets_queue = queue.config().queues.tickets.clone();
        Self {
            detector,
            image_store,
            queue,
            tickets_queue,
            jurisdiction_marker,
        }
    }
}

#[async_trait::async_trait]
impl MessageProcessor for UploadProcessor {
    #[instrument(skip(self, message), fields(message_id = %message.message_id))]
    async fn process(&self, message: &ReceivedMessage) -> Result<(), ProcessingError> {
        let event: UploadEvent = message
            .decode_json()
            .map_err(ProcessingError::terminal)?;

        let blocks = self
            .detector
            .detect_text(&event.bucket, &event.key)
            .await
            .map_err(ProcessingError::transient)?;

        match extract_plate(blocks.iter().map(String::as_str), &self.jurisdiction_marker) {
            PlateScan::Plate(plate) => {
                let metadata = self
                    .image_store
                    .violation_metadata(&event.bucket, &event.key)
                    .await
                    .map_err(|e| match e {
                        ImageStoreError::MissingMetadata { .. } => ProcessingError::terminal(e),
                        ImageStoreError::Storage { .. } => ProcessingError::transient(e),
                    })?;

                let ticket =
                    build_ticket(&plate, &metadata).map_err(ProcessingError::terminal)?;

                self.queue
                    .send_json(&self.tickets_queue, &ticket)
                    .await
                    .map_err(ProcessingError::transient)?;

                info!(
                    plate = %ticket.plate,
                    violation = %ticket.violation,
                    amount = ticket.amount,
                    "Ticket published"
                );
                Ok(())
            }
            PlateScan::Rejected(RejectReason::NotTargetJurisdiction) => {
                // Defined alternate path, not an error: hand the image to a
                // human and consume the message.
                self.image_store
                    .copy_to_review(&event.bucket, &event.key)
                    .await
                    .map_err(ProcessingError::transient)?;

                info!(key = %event.key, "Image outside target jurisdiction");
                Ok(())
            }
            PlateScan::Rejected(RejectReason::NoValidPlate) => Err(ProcessingError::terminal(
                anyhow!("no valid plate found in {}", event.key),
            )),
        }
    }
}
