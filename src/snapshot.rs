//! Storage snapshots checked from the command line.
//!
//! A snapshot maps every phrase key to its texts by locale:
//!
//! ```json
//! {
//!   "greeting": { "en": "Hello {{name}}", "fr": "Bonjour {{name}}" },
//!   "inbox": { "en": { "one": "%{count} message", "other": "%{count} messages" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::config::EngineSettings;
use crate::consistency::validate::TranslationError;
use crate::locale::{
    LocaleId,
    Locales,
};
use crate::phrase::{
    Phrase,
    PhraseId,
};
use crate::text::Text;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON snapshot: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML snapshot: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported snapshot format '{0}'. Expected .json, .yaml or .yml")]
    UnsupportedFormat(String),
}

/// Texts of every phrase, by locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Phrase key → locale code → text.
    phrases: BTreeMap<String, BTreeMap<String, Text>>,
}

/// A validation error of one translation in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub key: String,
    pub locale: LocaleId,
    pub error: TranslationError,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}: {}", self.key, self.locale, self.error.field, self.error.message())
    }
}

impl Snapshot {
    /// Reads a snapshot file, JSON or YAML depending on its extension.
    ///
    /// # Errors
    /// - File read error
    /// - Parse error
    /// - Unknown extension
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
        tracing::debug!("Loading snapshot from: {:?}", path);

        match extension {
            "json" => Ok(Self::from_json_str(&std::fs::read_to_string(path)?)?),
            "yaml" | "yml" => Ok(Self::from_yaml_str(&std::fs::read_to_string(path)?)?),
            other => Err(SnapshotError::UnsupportedFormat(other.to_string())),
        }
    }

    /// # Errors
    /// Returns an error if the JSON is malformed.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Ok(Self::from_document(Text::from(value)))
    }

    /// # Errors
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        Ok(Self::from_document(Text::from(value)))
    }

    /// Keeps the phrases whose texts are keyed by locale.
    fn from_document(document: Text) -> Self {
        let entries = match document {
            Text::Map(entries) => entries,
            other => {
                tracing::warn!(kind = ?other.kind(), "Snapshot is not keyed by phrase");
                return Self::default();
            }
        };

        let mut phrases = BTreeMap::new();
        for (key, texts) in entries {
            let Text::Map(texts) = texts else {
                tracing::warn!(%key, "Skipping phrase whose texts are not keyed by locale");
                continue;
            };
            phrases.insert(key, texts);
        }
        Self { phrases }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Builds phrases as an editor would fill them in: the primary text first, then
    /// every other locale coerced against it.
    #[must_use]
    pub fn to_phrases(&self, settings: &EngineSettings) -> Vec<Phrase> {
        let locales = settings.locales();
        self.phrases
            .iter()
            .zip(1..)
            .map(|((key, texts), id)| build_phrase(PhraseId::new(id), key, texts, &locales, settings))
            .collect()
    }

    /// Validates every translation of the snapshot.
    #[must_use]
    pub fn check(&self, settings: &EngineSettings) -> Vec<Finding> {
        let locales = settings.locales();
        let mut findings = Vec::new();

        for mut phrase in self.to_phrases(settings) {
            if phrase.validate(&locales) {
                continue;
            }
            for translation in phrase.translations() {
                findings.extend(translation.errors().iter().map(|error| Finding {
                    key: phrase.key().to_string(),
                    locale: translation.locale_id().clone(),
                    error: error.clone(),
                }));
            }
        }

        tracing::debug!(phrases = self.len(), findings = findings.len(), "Checked snapshot");
        findings
    }
}

/// Assigns the texts of one phrase, primary locale first.
fn build_phrase(
    id: PhraseId,
    key: &str,
    texts: &BTreeMap<String, Text>,
    locales: &Locales,
    settings: &EngineSettings,
) -> Phrase {
    let mut phrase = Phrase::new(id, key);
    let primary = locales.primary_locale_id();

    if let Some(text) = texts.get(primary.as_str()) {
        phrase.set_text(primary, text.clone(), locales, settings);
    } else {
        tracing::warn!(%key, %primary, "Phrase has no primary translation");
    }

    for (code, text) in texts {
        let locale = LocaleId::new(code.as_str());
        if !locales.is_primary(&locale) {
            phrase.set_text(&locale, text.clone(), locales, settings);
        }
    }
    phrase
}
