//! UI Builder module for formatting bot replies

use teloxide::utils::markdown::{bold, escape};

use super::prediction_client::PredictionReply;
use super::RelayError;
use crate::errors::ClientError;
use crate::localization::LocalizationManager;

/// Render a prediction as MarkdownV2 text
pub fn format_prediction(
    reply: &PredictionReply,
    localizer: &LocalizationManager,
    language_code: Option<&str>,
) -> String {
    let label = reply
        .label
        .clone()
        .unwrap_or_else(|| localizer.message("prediction-unknown-label", language_code));

    let confidence = reply
        .confidence
        .map(|c| c.to_string())
        .unwrap_or_else(|| localizer.message("prediction-unknown-confidence", language_code));

    let actions = match reply.actions() {
        Some(actions) => actions.to_vec(),
        None => vec![localizer.message("prediction-no-remedy", language_code)],
    };

    format!(
        "🌾 {}\n\n🩺 {}: {}\n📊 {}: {}\n\n🛠 {}:\n{}",
        bold(&escape(&localizer.message("prediction-title", language_code))),
        escape(&localizer.message("prediction-disease", language_code)),
        bold(&escape(&label)),
        escape(&localizer.message("prediction-confidence", language_code)),
        bold(&escape(&confidence)),
        escape(&localizer.message("prediction-actions", language_code)),
        format_actions(&actions)
    )
}

/// Bullet list of actions, escaped for MarkdownV2
pub fn format_actions(actions: &[String]) -> String {
    actions
        .iter()
        .map(|action| escape(&format!("- {action}")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a failed relay as plain text
pub fn format_relay_error(
    error: &RelayError,
    localizer: &LocalizationManager,
    language_code: Option<&str>,
) -> String {
    match error {
        RelayError::Service(ClientError::Rejected { body, .. }) => format!(
            "❌ {}\n{}",
            localizer.message("error-prediction-failed", language_code),
            body
        ),
        other => {
            let msg = other.to_string();
            format!(
                "❌ {}",
                localizer.message_with_args("error-generic", &[("msg", msg.as_str())], language_code)
            )
        }
    }
}

/// Welcome text for `/start`
pub fn format_welcome(localizer: &LocalizationManager, language_code: Option<&str>) -> String {
    format!(
        "👋 {}\n\n{}\n\n{}",
        localizer.message("welcome-title", language_code),
        localizer.message("welcome-description", language_code),
        localizer.message("help-commands", language_code)
    )
}

/// Usage text for `/help`
pub fn format_help(localizer: &LocalizationManager, language_code: Option<&str>) -> String {
    [
        "help-title",
        "help-step1",
        "help-step2",
        "help-step3",
        "help-commands",
    ]
    .iter()
    .map(|key| localizer.message(key, language_code))
    .collect::<Vec<_>>()
    .join("\n\n")
}
