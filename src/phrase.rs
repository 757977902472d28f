//! Phrase aggregate: a translation key and its translations, one per locale.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use crate::config::EngineSettings;
use crate::consistency::validate::ValidationErrors;
use crate::locale::{
    LocaleId,
    Locales,
};
use crate::text::Text;
use crate::translation::{
    Counterpart,
    PrimaryTextChanged,
    Translation,
};

/// Storage identifier of a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseId(u64);

impl PhraseId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PhraseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Storage identifier.
    id: PhraseId,
    /// Translation key, e.g. `greeting.title`.
    key: String,
    /// At most one translation per locale.
    translations: Vec<Translation>,
}

impl Phrase {
    #[must_use]
    pub fn new(id: PhraseId, key: impl Into<String>) -> Self {
        Self { id, key: key.into(), translations: Vec::new() }
    }

    #[must_use]
    pub const fn id(&self) -> PhraseId {
        self.id
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    /// Adds a translation, replacing the one already held for the same locale.
    ///
    /// Returns the replaced translation.
    pub fn insert_translation(&mut self, translation: Translation) -> Option<Translation> {
        match self.translations.iter_mut().find(|t| t.locale_id() == translation.locale_id()) {
            Some(existing) => Some(std::mem::replace(existing, translation)),
            None => {
                self.translations.push(translation);
                None
            }
        }
    }

    /// The translation in the primary locale.
    #[must_use]
    pub fn primary(&self, locales: &Locales) -> Option<&Translation> {
        self.translation_for(locales.primary_locale_id())
    }

    #[must_use]
    pub fn translation_for(&self, locale: &LocaleId) -> Option<&Translation> {
        self.translations.iter().find(|t| t.locale_id() == locale)
    }

    /// Snapshot of the primary translation's text.
    fn primary_text(&self, locales: &Locales) -> Option<Text> {
        self.primary(locales).map(|t| t.text().clone())
    }

    /// Mutable access to the translation of `locale`, created empty when missing.
    #[allow(clippy::indexing_slicing)]
    fn translation_entry(&mut self, locale: &LocaleId) -> &mut Translation {
        let index = match self.translations.iter().position(|t| t.locale_id() == locale) {
            Some(index) => index,
            None => {
                self.translations.push(Translation::new(self.id, locale.clone()));
                self.translations.len() - 1
            }
        };
        &mut self.translations[index]
    }

    /// Assigns a value to the translation of `locale`.
    ///
    /// Returns `false` when the assignment did not change the text.
    pub fn set_text(
        &mut self,
        locale: &LocaleId,
        raw: impl Into<Text>,
        locales: &Locales,
        settings: &EngineSettings,
    ) -> bool {
        let primary_text = self.primary_text(locales);
        let counterpart = counterpart_for(locale, locales, primary_text.as_ref());
        self.translation_entry(locale).set_text(raw, counterpart, settings)
    }

    /// Validates every translation against the primary one.
    ///
    /// Returns true when all of them are valid; the errors stay on each translation.
    pub fn validate(&mut self, locales: &Locales) -> bool {
        let primary_text = self.primary_text(locales);
        let mut valid = true;
        for translation in &mut self.translations {
            let counterpart =
                counterpart_for(translation.locale_id(), locales, primary_text.as_ref());
            valid &= translation.validate(counterpart);
        }
        valid
    }

    /// Saves the translation of `locale`.
    ///
    /// When the primary text changed, the sibling translations are flagged stale
    /// once the save went through.
    ///
    /// # Errors
    /// Returns the validation errors of the translation.
    pub fn save_translation(
        &mut self,
        locale: &LocaleId,
        locales: &Locales,
    ) -> Result<Option<PrimaryTextChanged>, ValidationErrors> {
        let primary_text = self.primary_text(locales);
        let counterpart = counterpart_for(locale, locales, primary_text.as_ref());

        let Some(translation) = self.translations.iter_mut().find(|t| t.locale_id() == locale)
        else {
            tracing::debug!(key = %self.key, %locale, "No translation to save");
            return Ok(None);
        };

        let event = translation.save(counterpart)?;
        if let Some(event) = &event {
            self.propagate(event, locales);
        }
        Ok(event)
    }

    /// Flags every non-primary translation stale after the primary text changed.
    ///
    /// Texts are left untouched. Events of other phrases are ignored. Returns the
    /// number of translations flagged.
    pub fn propagate(&mut self, event: &PrimaryTextChanged, locales: &Locales) -> usize {
        if event.phrase_id != self.id {
            return 0;
        }

        let mut flagged = 0;
        for translation in &mut self.translations {
            if !locales.is_primary(translation.locale_id()) {
                translation.mark_stale();
                flagged += 1;
            }
        }

        tracing::debug!(key = %self.key, flagged, "Primary text changed");
        flagged
    }
}

/// Decides what the translation of `locale` is checked against.
#[must_use]
pub fn counterpart_for<'a>(
    locale: &LocaleId,
    locales: &Locales,
    primary_text: Option<&'a Text>,
) -> Counterpart<'a> {
    if locales.is_primary(locale) {
        return Counterpart::Primary;
    }
    primary_text.map_or(Counterpart::Orphan, Counterpart::Sibling)
}
