//! Wire message types shared by the pipeline stages.
//!
//! Field names on these structs are external contracts: the ticket queue and
//! the violation queue are consumed by independently deployed stages, so the
//! serialized names must not drift. The rename from `violation`/`location`/
//! `amount` on the ticket to `violationType`/`violationLocation`/
//! `ticketAmount` on the violation record happens in stage 2's enrichment.

use serde::{Deserialize, Serialize};

/// Notification that an image object landed in the upload bucket
/// (stage 1 input).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadEvent {
    /// Bucket holding the uploaded image
    pub bucket: String,
    /// Object key of the uploaded image
    pub key: String,
}

/// A ticket produced by stage 1 from an extracted plate and the image's
/// violation metadata (ticket queue payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Extracted and validated license plate
    pub plate: String,
    /// Violation type, one of the fixed set known to the amount table
    pub violation: String,
    /// Human-readable violation location
    pub location: String,
    /// Human-readable violation date
    pub date: String,
    /// Ticket amount in whole dollars, derived from the violation type
    pub amount: u32,
}

/// A ticket enriched with registry data by stage 2 (violation queue
/// payload). Vehicle and owner fields are empty strings when the plate is
/// unregistered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficViolation {
    pub plate: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default, rename = "preferredLanguage")]
    pub preferred_language: String,
    #[serde(rename = "violationLocation")]
    pub violation_location: String,
    #[serde(rename = "violationType")]
    pub violation_type: String,
    #[serde(rename = "ticketAmount")]
    pub ticket_amount: u32,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_wire_field_names() {
        let ticket = Ticket {
            plate: "3CDE451".to_string(),
            violation: "No right on red.".to_string(),
            location: "45th and Stone Way intersection, Seattle".to_string(),
            date: "January 1, 2024".to_string(),
            amount: 125,
        };

        let json: serde_json::Value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["plate"], "3CDE451");
        assert_eq!(json["violation"], "No right on red.");
        assert_eq!(json["location"], "45th and Stone Way intersection, Seattle");
        assert_eq!(json["date"], "January 1, 2024");
        assert_eq!(json["amount"], 125);
    }

    #[test]
    fn test_violation_wire_field_names() {
        let violation = TrafficViolation {
            plate: "3CDE451".to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            color: "Blue".to_string(),
            name: "Ada Diaz".to_string(),
            contact: "ada@example.com".to_string(),
            preferred_language: "Spanish".to_string(),
            violation_location: "45th and Stone Way intersection, Seattle".to_string(),
            violation_type: "No right on red.".to_string(),
            ticket_amount: 125,
            date: "January 1, 2024".to_string(),
        };

        let json: serde_json::Value = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["preferredLanguage"], "Spanish");
        assert_eq!(json["violationLocation"], "45th and Stone Way intersection, Seattle");
        assert_eq!(json["violationType"], "No right on red.");
        assert_eq!(json["ticketAmount"], 125);
        assert_eq!(json["contact"], "ada@example.com");
    }

    #[test]
    fn test_violation_missing_owner_fields_default_empty() {
        let body = r#"{
            "plate": "8Z9Q111",
            "violationLocation": "145th and Greenwood intersection, Shoreline",
            "violationType": "No stop.",
            "ticketAmount": 300,
            "date": "March 5, 2024"
        }"#;

        let violation: TrafficViolation = serde_json::from_str(body).unwrap();
        assert_eq!(violation.make, "");
        assert_eq!(violation.contact, "");
        assert_eq!(violation.preferred_language, "");
        assert_eq!(violation.ticket_amount, 300);
    }
}
