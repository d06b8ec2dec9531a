//! Ticket enrichment: merge a registry lookup result into the outbound
//! violation record.
//!
//! This is where the field-name drift between the two queue contracts is
//! resolved: `violation` becomes `violationType`, `location` becomes
//! `violationLocation`, `amount` becomes `ticketAmount`.

use crate::store::RegistryRecord;
use platewatch_pipeline::{Ticket, TrafficViolation};

/// Merge a ticket with the registry record for its plate.
///
/// An unregistered plate yields empty vehicle/owner fields rather than a
/// failure; the ticket-only information still flows downstream so a human
/// can follow up manually. Violation fields are always copied verbatim
/// from the ticket.
pub fn enrich(ticket: &Ticket, record: Option<RegistryRecord>) -> TrafficViolation {
    let (make, model, color, name, contact, preferred_language) = match record {
        Some(r) => (
            r.make,
            r.model,
            r.color,
            r.owner_name,
            r.owner_contact,
            r.preferred_language,
        ),
        None => Default::default(),
    };

    TrafficViolation {
        plate: ticket.plate.clone(),
        make,
        model,
        color,
        name,
        contact,
        preferred_language,
        violation_location: ticket.location.clone(),
        violation_type: ticket.violation.clone(),
        ticket_amount: ticket.amount,
        date: ticket.date.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket {
            plate: "3CDE451".to_string(),
            violation: "No right on red.".to_string(),
            location: "45th and Stone Way intersection, Seattle".to_string(),
            date: "January 1, 2024".to_string(),
            amount: 125,
        }
    }

    fn record() -> RegistryRecord {
        RegistryRecord {
            plate: "3CDE451".to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            color: "Blue".to_string(),
            owner_name: "Ada Diaz".to_string(),
            owner_contact: "ada@example.com".to_string(),
            preferred_language: "Spanish".to_string(),
        }
    }

    #[test]
    fn test_enrich_registered_plate() {
        let violation = enrich(&ticket(), Some(record()));
        assert_eq!(violation.make, "Honda");
        assert_eq!(violation.name, "Ada Diaz");
        assert_eq!(violation.contact, "ada@example.com");
        assert_eq!(violation.preferred_language, "Spanish");
    }

    #[test]
    fn test_enrich_unregistered_plate_has_empty_fields() {
        let violation = enrich(&ticket(), None);
        // Empty strings, never missing values.
        assert_eq!(violation.make, "");
        assert_eq!(violation.model, "");
        assert_eq!(violation.color, "");
        assert_eq!(violation.name, "");
        assert_eq!(violation.contact, "");
        assert_eq!(violation.preferred_language, "");
    }

    #[test]
    fn test_violation_fields_copied_verbatim() {
        let t = ticket();
        for record in [None, Some(record())] {
            let violation = enrich(&t, record);
            assert_eq!(violation.plate, t.plate);
            assert_eq!(violation.violation_type, t.violation);
            assert_eq!(violation.violation_location, t.location);
            assert_eq!(violation.ticket_amount, t.amount);
            assert_eq!(violation.date, t.date);
        }
    }

    #[test]
    fn test_round_trip_preserves_ticket_fields() {
        let t = ticket();
        let violation = enrich(&t, None);

        let recovered = Ticket {
            plate: violation.plate.clone(),
            violation: violation.violation_type.clone(),
            location: violation.violation_location.clone(),
            date: violation.date.clone(),
            amount: violation.ticket_amount,
        };
        assert_eq!(recovered, t);
    }
}
