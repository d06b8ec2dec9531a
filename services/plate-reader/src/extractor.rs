//! Plate extraction from detected text blocks.
//!
//! The OCR collaborator hands back every text fragment it finds in the
//! image, with no notion of which fragment is the plate. The extractor
//! makes that call: confirm the jurisdiction marker appears somewhere in
//! the image, and keep the most recent fragment shaped like a plate
//! number. The two signals are tracked independently, so a plate-shaped
//! string from an unrelated part of the image can win; that behavior is
//! deliberate (last-validated-wins).

/// Why a scan produced no plate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The jurisdiction marker never appeared; the image belongs in the
    /// manual-review store
    NotTargetJurisdiction,
    /// The marker appeared but no block passed plate validation
    NoValidPlate,
}

/// Outcome of scanning one image's text blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlateScan {
    /// The last validated plate candidate
    Plate(String),
    Rejected(RejectReason),
}

/// Check whether a candidate string is a plausible plate number.
///
/// True iff the candidate is exactly 7 characters, ASCII alphanumeric
/// only, and contains at least one letter and at least one digit.
pub fn is_valid_plate(candidate: &str) -> bool {
    if candidate.len() != 7 {
        return false;
    }
    if !candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    candidate.chars().any(|c| c.is_ascii_alphabetic())
        && candidate.chars().any(|c| c.is_ascii_digit())
}

/// Scan the text blocks of one image for a plate number.
///
/// A block equal to `jurisdiction_marker` confirms the jurisdiction; each
/// block passing [`is_valid_plate`] overwrites the candidate. A later
/// non-validating block never erases a validated candidate.
pub fn extract_plate<'a, I>(blocks: I, jurisdiction_marker: &str) -> PlateScan
where
    I: IntoIterator<Item = &'a str>,
{
    let mut jurisdiction_confirmed = false;
    let mut candidate: Option<&str> = None;

    for block in blocks {
        if block == jurisdiction_marker {
            jurisdiction_confirmed = true;
        }
        if is_valid_plate(block) {
            candidate = Some(block);
        }
    }

    if !jurisdiction_confirmed {
        return PlateScan::Rejected(RejectReason::NotTargetJurisdiction);
    }

    match candidate {
        Some(plate) => PlateScan::Plate(plate.to_string()),
        None => PlateScan::Rejected(RejectReason::NoValidPlate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plate_mixed() {
        assert!(is_valid_plate("7ABC123"));
        assert!(is_valid_plate("3CDE451"));
        assert!(is_valid_plate("a1b2c3d"));
    }

    #[test]
    fn test_plate_requires_digit_and_letter() {
        assert!(!is_valid_plate("ABCDEFG"));
        assert!(!is_valid_plate("1234567"));
    }

    #[test]
    fn test_plate_length_and_charset() {
        assert!(!is_valid_plate(""));
        assert!(!is_valid_plate("AB12"));
        assert!(!is_valid_plate("AB123456"));
        assert!(!is_valid_plate("AB-1234"));
        assert!(!is_valid_plate("AB 1234"));
    }

    #[test]
    fn test_wrong_jurisdiction_rejected_despite_valid_plate() {
        let blocks = ["Washington", "7X3Y921"];
        assert_eq!(
            extract_plate(blocks, "California"),
            PlateScan::Rejected(RejectReason::NotTargetJurisdiction)
        );
    }

    #[test]
    fn test_no_valid_plate_in_jurisdiction() {
        let blocks = ["California", "INVALID!"];
        assert_eq!(
            extract_plate(blocks, "California"),
            PlateScan::Rejected(RejectReason::NoValidPlate)
        );
    }

    #[test]
    fn test_last_validated_candidate_wins() {
        let blocks = ["California", "1A2B3C4", "junk", "8Z9Q111"];
        assert_eq!(
            extract_plate(blocks, "California"),
            PlateScan::Plate("8Z9Q111".to_string())
        );
    }

    #[test]
    fn test_later_junk_does_not_erase_candidate() {
        let blocks = ["California", "8Z9Q111", "not a plate"];
        assert_eq!(
            extract_plate(blocks, "California"),
            PlateScan::Plate("8Z9Q111".to_string())
        );
    }

    #[test]
    fn test_marker_after_plate_still_confirms() {
        let blocks = ["8Z9Q111", "California"];
        assert_eq!(
            extract_plate(blocks, "California"),
            PlateScan::Plate("8Z9Q111".to_string())
        );
    }

    #[test]
    fn test_marker_match_is_exact() {
        let blocks = ["california", "8Z9Q111"];
        assert_eq!(
            extract_plate(blocks, "California"),
            PlateScan::Rejected(RejectReason::NotTargetJurisdiction)
        );
    }

    #[test]
    fn test_empty_block_sequence() {
        assert_eq!(
            extract_plate(std::iter::empty(), "California"),
            PlateScan::Rejected(RejectReason::NotTargetJurisdiction)
        );
    }

    #[test]
    fn test_marker_followed_by_single_plate() {
        let blocks = ["California", "3CDE451"];
        assert_eq!(
            extract_plate(blocks, "California"),
            PlateScan::Plate("3CDE451".to_string())
        );
    }
}
