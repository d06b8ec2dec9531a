//! Ticket construction from an extracted plate and the image's stored
//! violation metadata.

use platewatch_pipeline::Ticket;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-image violation attributes set at upload time as object-storage
/// metadata, immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationMetadata {
    /// Violation type, expected to be a key of the amount table
    pub violation: String,
    /// Human-readable violation location
    pub location: String,
    /// Human-readable violation date
    pub date: String,
}

/// Errors that can occur while building a ticket
#[derive(Error, Debug)]
pub enum TicketError {
    /// The uploaded metadata named a violation type outside the fixed set;
    /// the upload was malformed at the source
    #[error("Unknown violation type: {0:?}")]
    UnknownViolationType(String),
}

/// Fine amount for a violation type.
///
/// The table is fixed; the amount on a ticket is always derived from it
/// and never supplied by the upload directly.
pub fn violation_amount(violation_type: &str) -> Option<u32> {
    match violation_type {
        "No stop." => Some(300),
        "No full stop on right." => Some(75),
        "No right on red." => Some(125),
        _ => None,
    }
}

/// Build a ticket from a validated plate and the image's metadata
pub fn build_ticket(plate: &str, metadata: &ViolationMetadata) -> Result<Ticket, TicketError> {
    let amount = violation_amount(&metadata.violation)
        .ok_or_else(|| TicketError::UnknownViolationType(metadata.violation.clone()))?;

    Ok(Ticket {
        plate: plate.to_string(),
        violation: metadata.violation.clone(),
        location: metadata.location.clone(),
        date: metadata.date.clone(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(violation: &str) -> ViolationMetadata {
        ViolationMetadata {
            violation: violation.to_string(),
            location: "45th and Stone Way intersection, Seattle".to_string(),
            date: "January 1, 2024".to_string(),
        }
    }

    #[test]
    fn test_amount_table() {
        assert_eq!(violation_amount("No stop."), Some(300));
        assert_eq!(violation_amount("No full stop on right."), Some(75));
        assert_eq!(violation_amount("No right on red."), Some(125));
        assert_eq!(violation_amount("Speeding."), None);
    }

    #[test]
    fn test_build_ticket_copies_metadata_and_derives_amount() {
        let ticket = build_ticket("3CDE451", &metadata("No right on red.")).unwrap();
        assert_eq!(ticket.plate, "3CDE451");
        assert_eq!(ticket.violation, "No right on red.");
        assert_eq!(ticket.location, "45th and Stone Way intersection, Seattle");
        assert_eq!(ticket.date, "January 1, 2024");
        assert_eq!(ticket.amount, 125);
    }

    #[test]
    fn test_unknown_violation_type_fails() {
        let result = build_ticket("3CDE451", &metadata("Jaywalking."));
        assert!(matches!(
            result,
            Err(TicketError::UnknownViolationType(v)) if v == "Jaywalking."
        ));
    }

    #[test]
    fn test_unknown_type_never_defaults_to_zero() {
        // A miss must be an error, not a zero-dollar ticket.
        assert!(build_ticket("3CDE451", &metadata("")).is_err());
    }
}
