//! Language-name resolution for the translation collaborator.
//!
//! Registry records carry the owner's preferred language as a
//! human-readable name; the translation service wants a code. The table is
//! process-wide and read-only; [`init`] forces construction during startup
//! so no stage runs against partial state.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

/// The preferred language on a violation record has no table entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language: {0:?}")]
pub struct UnknownLanguage(pub String);

/// Language names recognized on registry records, with their
/// translation-service codes
const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("Afrikaans", "af"),
    ("Albanian", "sq"),
    ("Amharic", "am"),
    ("Arabic", "ar"),
    ("Armenian", "hy"),
    ("Azerbaijani", "az"),
    ("Bengali", "bn"),
    ("Bosnian", "bs"),
    ("Bulgarian", "bg"),
    ("Catalan", "ca"),
    ("Chinese (Simplified)", "zh"),
    ("Chinese (Traditional)", "zh-TW"),
    ("Croatian", "hr"),
    ("Czech", "cs"),
    ("Danish", "da"),
    ("Dari", "fa-AF"),
    ("Dutch", "nl"),
    ("English", "en"),
    ("Estonian", "et"),
    ("Farsi (Persian)", "fa"),
    ("Filipino, Tagalog", "tl"),
    ("Finnish", "fi"),
    ("French", "fr"),
    ("French (Canada)", "fr-CA"),
    ("Georgian", "ka"),
    ("German", "de"),
    ("Greek", "el"),
    ("Gujarati", "gu"),
    ("Haitian Creole", "ht"),
    ("Hausa", "ha"),
    ("Hebrew", "he"),
    ("Hindi", "hi"),
    ("Hungarian", "hu"),
    ("Icelandic", "is"),
    ("Indonesian", "id"),
    ("Irish", "ga"),
    ("Italian", "it"),
    ("Japanese", "ja"),
    ("Kannada", "kn"),
    ("Kazakh", "kk"),
    ("Korean", "ko"),
    ("Latvian", "lv"),
    ("Lithuanian", "lt"),
    ("Macedonian", "mk"),
    ("Malay", "ms"),
    ("Malayalam", "ml"),
    ("Maltese", "mt"),
    ("Marathi", "mr"),
    ("Mongolian", "mn"),
    ("Norwegian", "no"),
    ("Pashto", "ps"),
    ("Polish", "pl"),
    ("Portuguese (Brazil)", "pt"),
    ("Portuguese (Portugal)", "pt-PT"),
    ("Punjabi", "pa"),
    ("Romanian", "ro"),
    ("Russian", "ru"),
    ("Serbian", "sr"),
    ("Sinhala", "si"),
    ("Slovak", "sk"),
    ("Slovenian", "sl"),
    ("Somali", "so"),
    ("Spanish", "es"),
    ("Spanish (Mexico)", "es-MX"),
    ("Swahili", "sw"),
    ("Swedish", "sv"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Thai", "th"),
    ("Turkish", "tr"),
    ("Ukrainian", "uk"),
    ("Urdu", "ur"),
    ("Uzbek", "uz"),
    ("Vietnamese", "vi"),
    ("Welsh", "cy"),
];

/// Lookup keyed by lowercased name for case-insensitive resolution
static CODES_BY_NAME: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    LANGUAGE_CODES
        .iter()
        .map(|(name, code)| (name.to_lowercase(), *code))
        .collect()
});

/// Force the table to be built; called once at service startup
pub fn init() {
    Lazy::force(&CODES_BY_NAME);
}

/// Resolve a human-readable language name to a translation-service code.
///
/// Matching is case-insensitive but otherwise exact.
pub fn language_code(name: &str) -> Result<&'static str, UnknownLanguage> {
    CODES_BY_NAME
        .get(&name.to_lowercase())
        .copied()
        .ok_or_else(|| UnknownLanguage(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_known_languages() {
        assert_eq!(language_code("English"), Ok("en"));
        assert_eq!(language_code("Spanish"), Ok("es"));
        assert_eq!(language_code("Chinese (Traditional)"), Ok("zh-TW"));
        assert_eq!(language_code("Filipino, Tagalog"), Ok("tl"));
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        assert_eq!(language_code("SPANISH"), Ok("es"));
        assert_eq!(language_code("english"), Ok("en"));
        assert_eq!(language_code("fReNcH (CaNaDa)"), Ok("fr-CA"));
    }

    #[test]
    fn test_unknown_language_fails() {
        assert_eq!(
            language_code("Klingon"),
            Err(UnknownLanguage("Klingon".to_string()))
        );
        assert_eq!(language_code(""), Err(UnknownLanguage(String::new())));
    }

    #[test]
    fn test_table_size() {
        assert_eq!(LANGUAGE_CODES.len(), 75);
        // No names collapse onto each other when lowercased.
        assert_eq!(CODES_BY_NAME.len(), LANGUAGE_CODES.len());
    }
}
