use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::{
    LocaleId,
    Locales,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "primaryLocale")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list of validation errors.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Trim surrounding whitespace of texts assigned by editors.
    pub strip_texts: bool,

    /// Locale every other translation is checked against.
    pub primary_locale: String,
}

impl EngineSettings {
    /// # Errors
    /// - Primary locale is empty
    /// - Primary locale contains whitespace
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.primary_locale.is_empty() {
            errors.push(ValidationError::new(
                "primaryLocale",
                "The primary locale cannot be empty. Please specify a locale code, for example: \"en\"",
            ));
        } else if self.primary_locale.chars().any(char::is_whitespace) {
            errors.push(ValidationError::new(
                "primaryLocale",
                format!(
                    "Invalid locale code '{}': locale codes cannot contain whitespace",
                    self.primary_locale
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    #[must_use]
    pub fn locales(&self) -> Locales {
        Locales::new(LocaleId::new(self.primary_locale.as_str()))
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { strip_texts: true, primary_locale: "en".to_string() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = EngineSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"primaryLocale": "ja"}"#;

        let settings: EngineSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.primary_locale, eq("ja"));
        assert_that!(settings.strip_texts, eq(true));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: EngineSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings, eq(&EngineSettings::default()));
    }

    #[rstest]
    fn deserialize_strip_texts() {
        let settings: EngineSettings = serde_json::from_str(r#"{"stripTexts": false}"#).unwrap();

        assert_that!(settings.strip_texts, eq(false));
        assert_that!(settings.primary_locale, eq("en"));
    }

    #[rstest]
    #[case::empty("", "cannot be empty")]
    #[case::whitespace("en US", "cannot contain whitespace")]
    fn validate_invalid_primary_locale(#[case] locale: &str, #[case] message: &str) {
        let settings =
            EngineSettings { primary_locale: locale.to_string(), ..EngineSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("primaryLocale")),
                field!(ValidationError.message, contains_substring(message))
            ]])
        );
    }

    #[rstest]
    fn locales_use_primary_locale() {
        let settings =
            EngineSettings { primary_locale: "fr".to_string(), ..EngineSettings::default() };

        assert!(settings.locales().is_primary(&LocaleId::from("fr")));
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings =
            EngineSettings { primary_locale: String::new(), ..EngineSettings::default() };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. primaryLocale"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }
}
