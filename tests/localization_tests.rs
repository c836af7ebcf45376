//! # Localization Tests
//!
//! Message lookup, language resolution and argument substitution.

use agrobuddy::localization::LocalizationManager;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.message("prediction-title", Some("en"));
        assert_eq!(message, "Crop Disease Prediction");
    }

    #[test]
    fn test_get_message_in_french() {
        let manager = setup_localization();

        assert_eq!(manager.message("prediction-disease", Some("fr")), "Maladie");
        assert_eq!(manager.message("prediction-disease", Some("fr-CA")), "Maladie");
    }

    #[test]
    fn test_unsupported_language_falls_back_to_english() {
        let manager = setup_localization();

        assert_eq!(manager.resolve_language(Some("de")), "en");
        assert_eq!(manager.resolve_language(None), "en");
        assert_eq!(manager.message("prediction-disease", Some("de")), "Disease");
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.message("nonexistent-key", None);
        assert!(message.starts_with("Missing translation:"));
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();

        let args = [("msg", "connection refused")];

        let message = manager.message_with_args("error-generic", &args, None);
        assert_eq!(message, "Error: connection refused");

        let message = manager.message_with_args("error-generic", &args, Some("fr"));
        assert_eq!(message, "Erreur : connection refused");
    }

    #[test]
    fn test_every_english_key_exists_in_french() {
        let manager = setup_localization();
        let keys = [
            "welcome-title",
            "welcome-description",
            "help-title",
            "help-step1",
            "help-step2",
            "help-step3",
            "help-commands",
            "unsupported-message",
            "unsupported-document",
            "processing-photo",
            "prediction-title",
            "prediction-disease",
            "prediction-confidence",
            "prediction-actions",
            "prediction-unknown-label",
            "prediction-unknown-confidence",
            "prediction-no-remedy",
            "error-prediction-failed",
        ];

        for key in keys {
            assert!(!manager.message(key, Some("en")).starts_with("Missing translation"), "{key}");
            assert!(!manager.message(key, Some("fr")).starts_with("Missing translation"), "{key}");
        }
    }
}
