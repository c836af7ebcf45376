use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Language used when the user's language is unknown or unsupported
pub const DEFAULT_LANGUAGE: &str = "en";

/// Fluent resources compiled into the binary, keyed by language
const RESOURCES: [(&str, &str); 2] = [
    ("en", include_str!("../locales/en/main.ftl")),
    ("fr", include_str!("../locales/fr/main.ftl")),
];

/// Localization manager for the bot's user-facing messages
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every bundled language loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (code, source) in RESOURCES {
            let locale: LanguageIdentifier = code.parse()?;
            let bundle = Self::create_bundle(locale, source)?;
            bundles.insert(code.to_string(), bundle);
        }

        Ok(Self { bundles })
    }

    fn create_bundle(
        locale: LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Telegram renders the Unicode isolation marks literally
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Invalid Fluent resource for {locale}: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Duplicate Fluent messages for {locale}: {errors:?}"))?;

        Ok(bundle)
    }

    /// Pick the bundle for a Telegram language code such as `fr` or `fr-CA`
    pub fn resolve_language(&self, language_code: Option<&str>) -> &str {
        language_code
            .and_then(|code| code.split(['-', '_']).next())
            .map(|primary| primary.to_ascii_lowercase())
            .and_then(|primary| {
                self.bundles
                    .get_key_value(primary.as_str())
                    .map(|(k, _)| k.as_str())
            })
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Get a localized message
    pub fn message(&self, key: &str, language_code: Option<&str>) -> String {
        self.format(key, None, language_code)
    }

    /// Get a localized message with simple string arguments
    pub fn message_with_args(
        &self,
        key: &str,
        args: &[(&str, &str)],
        language_code: Option<&str>,
    ) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args), language_code)
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>, language_code: Option<&str>) -> String {
        let language = self.resolve_language(language_code);
        let Some(bundle) = self.bundles.get(language) else {
            return format!("Missing translation: {key}");
        };

        let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
            return format!("Missing translation: {key}");
        };

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            log::warn!("Errors while formatting message {key}: {errors:?}");
        }
        value.into_owned()
    }
}
