//! SMTP delivery for composed notifications.
//!
//! Plain-text email with a fixed sender address and subject line,
//! submitted over STARTTLS to the configured relay. Delivery is
//! best-effort from the pipeline's point of view; submission failures
//! surface as errors so the message can be redelivered.

use crate::config::SmtpConfig;
use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{info, instrument};

/// Errors that can occur while sending a notification
#[derive(Error, Debug)]
pub enum MailError {
    /// The recipient address on the violation record does not parse
    #[error("Invalid recipient address {address:?}: {message}")]
    InvalidAddress { address: String, message: String },

    /// The SMTP relay rejected or never accepted the submission
    #[error("Failed to submit message: {0}")]
    Submission(String),
}

/// SMTP collaborator handle, created once per stage lifetime
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    subject: String,
}

impl Mailer {
    /// Create a new mailer for the configured relay
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .context("Failed to configure SMTP transport")?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let sender: Mailbox = config
            .sender
            .parse()
            .context("Invalid sender address in configuration")?;

        info!(
            host = %config.host,
            port = config.port,
            sender = %config.sender,
            "Mailer initialized"
        );

        Ok(Self {
            transport,
            sender,
            subject: config.subject.clone(),
        })
    }

    /// Send a plain-text notification to the given address
    #[instrument(skip(self, body), fields(to = %to))]
    pub async fn send(&self, to: &str, body: String) -> Result<(), MailError> {
        let recipient: Mailbox = to.parse().map_err(|e: lettre::address::AddressError| {
            MailError::InvalidAddress {
                address: to.to_string(),
                message: e.to_string(),
            }
        })?;

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(self.subject.clone())
            .body(body)
            .map_err(|e| MailError::Submission(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Submission(e.to_string()))?;

        info!("Notification submitted");

        Ok(())
    }
}
