//! Stage 3 message processing: enriched violation in, delivered
//! notification out.

use crate::composer::NotificationComposer;
use crate::mailer::{MailError, Mailer};
use crate::translator::Translator;
use platewatch_pipeline::{MessageProcessor, ProcessingError, ReceivedMessage, TrafficViolation};
use tracing::{info, instrument, warn};

/// Processes violation messages: composition, localization, and delivery
pub struct ViolationProcessor<T> {
    composer: NotificationComposer<T>,
    mailer: Mailer,
}

impl<T: Translator> ViolationProcessor<T> {
    pub fn new(composer: NotificationComposer<T>, mailer: Mailer) -> Self {
        Self { composer, mailer }
    }
}

#[async_trait::async_trait]
impl<T: Translator> MessageProcessor for ViolationProcessor<T> {
    #[instrument(skip(self, message), fields(message_id = %message.message_id))]
    async fn process(&self, message: &ReceivedMessage) -> Result<(), ProcessingError> {
        let violation: TrafficViolation = message
            .decode_json()
            .map_err(ProcessingError::terminal)?;

        // An unresolvable language is a malformed record, not a delivery
        // problem.
        let body = self
            .composer
            .compose(&violation)
            .await
            .map_err(ProcessingError::terminal)?;

        if violation.contact.is_empty() {
            // Unregistered plate: nothing to deliver to. Keep the composed
            // notification in the log for manual follow-up and consume the
            // message.
            warn!(
                plate = %violation.plate,
                notification = %body,
                "No owner contact on record; notification logged for manual follow-up"
            );
            return Ok(());
        }

        self.mailer
            .send(&violation.contact, body)
            .await
            .map_err(|e| match e {
                MailError::InvalidAddress { .. } => ProcessingError::terminal(e),
                MailError::Submission(_) => ProcessingError::transient(e),
            })?;

        info!(
            plate = %violation.plate,
            contact = %violation.contact,
            "Notification delivered"
        );

        Ok(())
    }
}
