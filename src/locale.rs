//! Locale collaborator: primary locale lookup and plural category recognition.

use std::collections::BTreeMap;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use crate::text::Text;

/// CLDR plural categories.
pub const PLURAL_CATEGORIES: &[&str] = &["zero", "one", "two", "few", "many", "other"];

/// Locale code, e.g. `en` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleId(String);

impl LocaleId {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleId {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Knows which locale is the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locales {
    /// The locale every other translation is checked against.
    primary: LocaleId,
}

impl Locales {
    #[must_use]
    pub const fn new(primary: LocaleId) -> Self {
        Self { primary }
    }

    #[must_use]
    pub const fn primary_locale_id(&self) -> &LocaleId {
        &self.primary
    }

    #[must_use]
    pub fn is_primary(&self, locale: &LocaleId) -> bool {
        &self.primary == locale
    }
}

/// Returns true if every key of the map is a plural category.
///
/// An empty map is not treated as pluralization data.
#[must_use]
pub fn is_pluralization_data(map: &BTreeMap<String, Text>) -> bool {
    !map.is_empty() && map.keys().all(|key| PLURAL_CATEGORIES.contains(&key.as_str()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn map_with_keys(keys: &[&str]) -> BTreeMap<String, Text> {
        keys.iter().map(|key| ((*key).to_string(), Text::from("x"))).collect()
    }

    #[rstest]
    #[case::one_other(&["one", "other"], true)]
    #[case::all_categories(&["zero", "one", "two", "few", "many", "other"], true)]
    #[case::single_other(&["other"], true)]
    #[case::mixed(&["one", "title"], false)]
    #[case::plain_keys(&["title", "body"], false)]
    #[case::empty(&[], false)]
    fn test_is_pluralization_data(#[case] keys: &[&str], #[case] expected: bool) {
        assert_eq!(is_pluralization_data(&map_with_keys(keys)), expected);
    }

    #[rstest]
    fn test_is_primary() {
        let locales = Locales::new(LocaleId::from("en"));

        assert!(locales.is_primary(&LocaleId::from("en")));
        assert!(!locales.is_primary(&LocaleId::from("fr")));
        assert_eq!(locales.primary_locale_id().as_str(), "en");
    }
}
