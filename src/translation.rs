//! Translation entity.
//!
//! A translation is checked against the translation of the primary locale for the
//! same phrase. That counterpart is always passed in explicitly as a [`Counterpart`];
//! the entity never looks it up on its own.

use std::collections::BTreeSet;
use std::mem;

use crate::config::EngineSettings;
use crate::consistency::classify::{
    is_boolean,
    is_numeric,
};
use crate::consistency::coerce::{
    align_with_primary,
    coerce_assignment,
    is_explicit_null_literal,
};
use crate::consistency::validate::{
    BlankContext,
    TranslationError,
    ValidationErrors,
    check_not_blank,
    check_variables,
};
use crate::consistency::variables::detect_variables;
use crate::locale::LocaleId;
use crate::phrase::PhraseId;
use crate::text::Text;

/// The primary-locale translation a translation is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counterpart<'a> {
    /// The translation itself belongs to the primary locale.
    Primary,
    /// Text of the primary-locale translation of the same phrase.
    Sibling(&'a Text),
    /// The primary locale has no translation for the phrase yet.
    Orphan,
}

impl<'a> Counterpart<'a> {
    /// Text of the primary translation, if there is one other than the translation itself.
    #[must_use]
    pub const fn primary_text(self) -> Option<&'a Text> {
        match self {
            Self::Sibling(text) => Some(text),
            Self::Primary | Self::Orphan => None,
        }
    }

    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Primary)
    }
}

/// Typed reading of a translation's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Integer(u64),
    Boolean(bool),
    Text(Text),
}

/// Emitted when a save changed the text of a primary translation.
///
/// Sibling translations must be flagged for review; see [`crate::phrase::Phrase::propagate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryTextChanged {
    pub phrase_id: PhraseId,
    pub new_text: Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Owning phrase.
    phrase_id: PhraseId,
    /// Locale of this translation.
    locale_id: LocaleId,
    /// Current value.
    text: Text,
    /// Value replaced by the most recent persisted change.
    previous_text: Text,
    /// The primary text changed since this translation was last saved.
    primary_updated: bool,
    /// The current null was set on purpose.
    explicit_null: bool,
    /// Last persisted value, used to detect changes.
    persisted_text: Text,
    /// Errors of the last validation run.
    errors: Vec<TranslationError>,
}

impl Translation {
    /// An untranslated entry.
    #[must_use]
    pub fn new(phrase_id: PhraseId, locale_id: LocaleId) -> Self {
        Self::restore(phrase_id, locale_id, Text::Null, Text::Null, false)
    }

    /// Rebuilds a translation from its persisted state.
    #[must_use]
    pub fn restore(
        phrase_id: PhraseId,
        locale_id: LocaleId,
        text: Text,
        previous_text: Text,
        primary_updated: bool,
    ) -> Self {
        Self {
            phrase_id,
            locale_id,
            persisted_text: text.clone(),
            text,
            previous_text,
            primary_updated,
            explicit_null: false,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub const fn phrase_id(&self) -> PhraseId {
        self.phrase_id
    }

    #[must_use]
    pub const fn locale_id(&self) -> &LocaleId {
        &self.locale_id
    }

    #[must_use]
    pub const fn text(&self) -> &Text {
        &self.text
    }

    #[must_use]
    pub const fn previous_text(&self) -> &Text {
        &self.previous_text
    }

    /// The primary text changed since this translation was last saved.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.primary_updated
    }

    #[must_use]
    pub const fn is_up_to_date(&self) -> bool {
        !self.is_stale()
    }

    #[must_use]
    pub const fn explicit_null(&self) -> bool {
        self.explicit_null
    }

    pub const fn set_explicit_null(&mut self, explicit_null: bool) {
        self.explicit_null = explicit_null;
    }

    /// Errors found by the last call to [`Translation::validate`].
    #[must_use]
    pub fn errors(&self) -> &[TranslationError] {
        &self.errors
    }

    /// The text differs from the persisted one.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.text != self.persisted_text
    }

    /// Flags the translation for review after its primary text changed.
    pub const fn mark_stale(&mut self) {
        self.primary_updated = true;
    }

    /// Assigns a new value, coerced to the type of the primary translation.
    ///
    /// Returns `false` when the coerced value equals the current one; the text is
    /// then left untouched.
    pub fn set_text(
        &mut self,
        raw: impl Into<Text>,
        counterpart: Counterpart<'_>,
        settings: &EngineSettings,
    ) -> bool {
        let coerced = coerce_assignment(raw.into(), counterpart.primary_text(), settings.strip_texts);

        if self.is_same_value(&coerced.text) {
            self.explicit_null |= coerced.explicit_null;
            tracing::debug!(locale = %self.locale_id, "Assignment does not change the text");
            return false;
        }

        self.text = coerced.text;
        self.explicit_null = coerced.explicit_null;
        true
    }

    /// Equal, or the same string form as the current string text.
    fn is_same_value(&self, new_text: &Text) -> bool {
        if *new_text == self.text {
            return true;
        }
        match (&self.text, new_text) {
            (_, Text::Null) => false,
            (Text::String(current), new_text) => *current == new_text.to_string(),
            _ => false,
        }
    }

    /// Interpolation variables used by the text.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<String> {
        detect_variables(&self.text)
    }

    /// Returns true when the text uses exactly the substitutions of `primary`.
    #[must_use]
    pub fn variables_match(&self, primary: &Self) -> bool {
        self.variables() == primary.variables()
    }

    /// Boolean-typed translations follow their primary translation; without one,
    /// the translation's own text decides.
    #[must_use]
    pub fn is_boolean_typed(&self, counterpart: Counterpart<'_>) -> bool {
        counterpart.primary_text().map_or_else(|| is_boolean(&self.text), is_boolean)
    }

    /// Typed reading of the text for presentation.
    #[must_use]
    pub fn value(&self, counterpart: Counterpart<'_>) -> TypedValue {
        if let Text::String(s) = &self.text
            && is_numeric(s)
            && let Ok(number) = s.parse::<u64>()
        {
            return TypedValue::Integer(number);
        }

        if self.is_boolean_typed(counterpart) {
            let text = self.text.to_string().trim().to_lowercase();
            return TypedValue::Boolean(matches!(text.as_str(), "true" | "t"));
        }

        TypedValue::Text(self.text.clone())
    }

    /// Runs the pre-validation coercion and the validation rules.
    ///
    /// The errors found are kept on the translation, see [`Translation::errors`].
    pub fn validate(&mut self, counterpart: Counterpart<'_>) -> bool {
        self.errors.clear();

        if is_explicit_null_literal(&self.text) {
            self.text = Text::Null;
            self.explicit_null = true;
        }

        if let Some(primary) = counterpart.primary_text() {
            let coerced = align_with_primary(mem::take(&mut self.text), primary);
            self.text = coerced.text;
            self.explicit_null |= coerced.explicit_null;
        }

        let context = BlankContext {
            primary: counterpart.primary_text(),
            explicit_null: self.explicit_null,
            boolean_typed: self.is_boolean_typed(counterpart),
        };
        if let Some(error) = check_not_blank(&self.text, context) {
            self.errors.push(error);
        }

        if let Some(primary) = counterpart.primary_text()
            && let Some(error) = check_variables(&self.text, primary)
        {
            self.errors.push(error);
        }

        if !self.errors.is_empty() {
            tracing::debug!(
                locale = %self.locale_id,
                errors = self.errors.len(),
                "Translation failed validation"
            );
        }
        self.errors.is_empty()
    }

    /// Validates and persists the translation.
    ///
    /// On success the previous text is recorded (when the text changed) and the
    /// translation counts as reviewed again. When the saved translation is the
    /// primary one and its text changed, the returned event must be propagated to
    /// the sibling translations.
    ///
    /// # Errors
    /// Returns the validation errors when the translation is invalid; nothing is
    /// persisted in that case.
    pub fn save(
        &mut self,
        counterpart: Counterpart<'_>,
    ) -> Result<Option<PrimaryTextChanged>, ValidationErrors> {
        if !self.validate(counterpart) {
            return Err(ValidationErrors(self.errors.clone()));
        }

        let changed = self.is_changed();
        if changed {
            self.previous_text = mem::replace(&mut self.persisted_text, self.text.clone());
        }
        self.primary_updated = false;

        tracing::debug!(locale = %self.locale_id, changed, "Saved translation");

        Ok((changed && counterpart.is_primary()).then(|| PrimaryTextChanged {
            phrase_id: self.phrase_id,
            new_text: self.text.clone(),
        }))
    }
}
