//! Notification body composition.
//!
//! The body is a fixed English explanation, translated into the owner's
//! preferred language when that resolves to something other than English,
//! followed by a deterministic field-ordered summary of the violation.
//! Delivery outranks localization: a failed translation falls back to the
//! English text instead of failing the message.

use crate::languages::language_code;
use crate::translator::Translator;
use platewatch_pipeline::TrafficViolation;
use thiserror::Error;
use tracing::warn;

/// Fixed English explanation opening every notification
pub const EXPLANATION: &str = "Your vehicle was involved in a traffic violation. \
Please pay the specified ticket amount by 30 days: ";

/// Errors that can occur while composing a notification
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error(transparent)]
    UnknownLanguage(#[from] crate::languages::UnknownLanguage),
}

/// Builds localized notification bodies
pub struct NotificationComposer<T> {
    translator: T,
}

impl<T: Translator> NotificationComposer<T> {
    pub fn new(translator: T) -> Self {
        Self { translator }
    }

    /// Compose the full message body for a violation.
    ///
    /// Fails before any translation attempt when the preferred language is
    /// unresolvable. An empty preferred language (unregistered plate) is
    /// treated as English.
    pub async fn compose(&self, violation: &TrafficViolation) -> Result<String, ComposeError> {
        let explanation = self.localized_explanation(violation).await?;
        Ok(format!("{}\n\n{}", explanation, summary_block(violation)))
    }

    async fn localized_explanation(
        &self,
        violation: &TrafficViolation,
    ) -> Result<String, ComposeError> {
        let target = if violation.preferred_language.is_empty() {
            "en"
        } else {
            language_code(&violation.preferred_language)?
        };

        if target == "en" {
            return Ok(EXPLANATION.to_string());
        }

        match self.translator.translate(EXPLANATION, target).await {
            Ok(translated) => Ok(translated),
            Err(e) => {
                warn!(
                    target = %target,
                    error = %e,
                    "Translation failed; falling back to English"
                );
                Ok(EXPLANATION.to_string())
            }
        }
    }
}

/// Deterministic field-ordered violation summary
fn summary_block(violation: &TrafficViolation) -> String {
    format!(
        "Vehicle: {} {} {}\n\
         License plate: {}\n\
         Date: {}\n\
         Violation address: {}\n\
         Violation type: {}\n\
         Ticket amount: {}\n",
        violation.color,
        violation.make,
        violation.model,
        violation.plate,
        violation.date,
        violation.violation_location,
        violation.violation_type,
        violation.ticket_amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::TranslateError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts invocations and prefixes the target code
    struct FakeTranslator {
        calls: AtomicUsize,
    }

    impl FakeTranslator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Translator for FakeTranslator {
        async fn translate(
            &self,
            text: &str,
            target_code: &str,
        ) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("[{}] {}", target_code, text))
        }
    }

    /// Always fails, counting invocations
    struct FailingTranslator {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Translator for FailingTranslator {
        async fn translate(&self, _: &str, _: &str) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TranslateError("service unavailable".to_string()))
        }
    }

    fn violation(preferred_language: &str) -> TrafficViolation {
        TrafficViolation {
            plate: "3CDE451".to_string(),
            make: String::new(),
            model: String::new(),
            color: String::new(),
            name: String::new(),
            contact: String::new(),
            preferred_language: preferred_language.to_string(),
            violation_location: "45th and Stone Way intersection, Seattle".to_string(),
            violation_type: "No right on red.".to_string(),
            ticket_amount: 125,
            date: "January 1, 2024".to_string(),
        }
    }

    #[tokio::test]
    async fn test_english_never_invokes_translation() {
        let composer = NotificationComposer::new(FakeTranslator::new());
        let body = composer.compose(&violation("English")).await.unwrap();

        assert_eq!(composer.translator.call_count(), 0);
        assert!(body.starts_with(EXPLANATION));
    }

    #[tokio::test]
    async fn test_empty_language_defaults_to_english() {
        let composer = NotificationComposer::new(FakeTranslator::new());
        let body = composer.compose(&violation("")).await.unwrap();

        assert_eq!(composer.translator.call_count(), 0);
        assert!(body.starts_with(EXPLANATION));
    }

    #[tokio::test]
    async fn test_other_language_invokes_translation_exactly_once() {
        let composer = NotificationComposer::new(FakeTranslator::new());
        let body = composer.compose(&violation("Spanish")).await.unwrap();

        assert_eq!(composer.translator.call_count(), 1);
        assert!(body.starts_with("[es] "));
    }

    #[tokio::test]
    async fn test_unresolvable_language_fails_before_translation() {
        let translator = FailingTranslator {
            calls: AtomicUsize::new(0),
        };
        let composer = NotificationComposer::new(translator);
        let result = composer.compose(&violation("Klingon")).await;

        assert!(matches!(result, Err(ComposeError::UnknownLanguage(_))));
        assert_eq!(composer.translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translation_failure_falls_back_to_english() {
        let translator = FailingTranslator {
            calls: AtomicUsize::new(0),
        };
        let composer = NotificationComposer::new(translator);
        let body = composer.compose(&violation("Spanish")).await.unwrap();

        assert_eq!(composer.translator.calls.load(Ordering::SeqCst), 1);
        assert!(body.starts_with(EXPLANATION));
    }

    #[tokio::test]
    async fn test_body_ends_with_ticket_amount_line() {
        let composer = NotificationComposer::new(FakeTranslator::new());
        let body = composer.compose(&violation("")).await.unwrap();

        assert!(body.ends_with("Ticket amount: 125\n"));
    }

    #[tokio::test]
    async fn test_summary_field_order() {
        let composer = NotificationComposer::new(FakeTranslator::new());
        let mut v = violation("");
        v.color = "Blue".to_string();
        v.make = "Honda".to_string();
        v.model = "Civic".to_string();
        let body = composer.compose(&v).await.unwrap();

        let expected = "Vehicle: Blue Honda Civic\n\
                        License plate: 3CDE451\n\
                        Date: January 1, 2024\n\
                        Violation address: 45th and Stone Way intersection, Seattle\n\
                        Violation type: No right on red.\n\
                        Ticket amount: 125\n";
        assert!(body.ends_with(expected));
    }
}
