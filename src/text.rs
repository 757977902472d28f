//! Text values stored on a translation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// The value held by a translation.
///
/// Numbers are never stored as such: every numeric input (an integer assigned by an
/// editor, a number found in a JSON or YAML document) is kept as its decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum Text {
    /// Not translated, or explicitly emptied.
    #[default]
    Null,
    Bool(bool),
    String(String),
    List(Vec<Text>),
    /// Keyed structure, e.g. plural category → text.
    Map(BTreeMap<String, Text>),
}

/// Runtime tag of a [`Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    Null,
    Bool,
    String,
    List,
    Map,
}

impl Text {
    #[must_use]
    pub const fn kind(&self) -> TextKind {
        match self {
            Self::Null => TextKind::Null,
            Self::Bool(_) => TextKind::Bool,
            Self::String(_) => TextKind::String,
            Self::List(_) => TextKind::List,
            Self::Map(_) => TextKind::Map,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Null, a whitespace-only string, or an empty collection.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(_) => false,
            Self::String(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
        }
    }

    /// JSON representation of the text.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) => JsonValue::Object(
                entries.iter().map(|(key, value)| (key.clone(), value.to_json())).collect(),
            ),
        }
    }
}

/// String form of the text: empty for null, `true`/`false` for booleans,
/// compact JSON for collections.
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::List(_) | Self::Map(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Text {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Text {
    fn from(value: i64) -> Self {
        Self::String(value.to_string())
    }
}

impl From<u64> for Text {
    fn from(value: u64) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i32> for Text {
    fn from(value: i32) -> Self {
        Self::String(value.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for Text {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Vec<Self>> for Text {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, Self>> for Text {
    fn from(value: BTreeMap<String, Self>) -> Self {
        Self::Map(value)
    }
}

impl From<JsonValue> for Text {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => Self::String(n.to_string()),
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(entries) => {
                Self::Map(entries.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
            }
        }
    }
}

impl From<Text> for JsonValue {
    fn from(value: Text) -> Self {
        value.to_json()
    }
}

impl From<YamlValue> for Text {
    fn from(value: YamlValue) -> Self {
        match value {
            YamlValue::Null => Self::Null,
            YamlValue::Bool(b) => Self::Bool(b),
            YamlValue::Number(n) => Self::String(n.to_string()),
            YamlValue::String(s) => Self::String(s),
            YamlValue::Sequence(items) => Self::List(items.into_iter().map(Self::from).collect()),
            YamlValue::Mapping(entries) => Self::Map(
                entries
                    .into_iter()
                    .filter_map(|(key, value)| yaml_key(key).map(|key| (key, Self::from(value))))
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// Scalar YAML keys as strings; structured keys are dropped.
fn yaml_key(key: YamlValue) -> Option<String> {
    match key {
        YamlValue::Null => Some(String::new()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::String(s) => Some(s),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn plural(one: &str, other: &str) -> Text {
        Text::Map(BTreeMap::from([
            ("one".to_string(), Text::from(one)),
            ("other".to_string(), Text::from(other)),
        ]))
    }

    #[rstest]
    #[case::integer(Text::from(42_i64), "42")]
    #[case::null(Text::Null, "")]
    #[case::boolean(Text::Bool(false), "false")]
    #[case::string(Text::from("Hello"), "Hello")]
    #[case::map(plural("1 item", "items"), r#"{"one":"1 item","other":"items"}"#)]
    fn test_display(#[case] text: Text, #[case] expected: &str) {
        assert_eq!(text.to_string(), expected);
    }

    #[rstest]
    #[case::null(Text::Null, true)]
    #[case::empty(Text::from(""), true)]
    #[case::whitespace(Text::from("  \n"), true)]
    #[case::empty_map(Text::Map(BTreeMap::new()), true)]
    #[case::word(Text::from("x"), false)]
    #[case::boolean(Text::Bool(false), false)]
    fn test_is_blank(#[case] text: Text, #[case] expected: bool) {
        assert_eq!(text.is_blank(), expected);
    }

    #[googletest::test]
    fn test_from_json_converts_numbers_to_strings() {
        let text = Text::from(json!({ "one": 1, "other": ["a", true, null] }));

        expect_that!(
            text,
            eq(&Text::Map(BTreeMap::from([
                ("one".to_string(), Text::from("1")),
                (
                    "other".to_string(),
                    Text::List(vec![Text::from("a"), Text::Bool(true), Text::Null])
                ),
            ])))
        );
    }

    #[googletest::test]
    fn test_from_yaml_mapping() {
        let yaml: YamlValue = serde_yaml::from_str("one: '%{count} item'\nother: 3").unwrap();

        expect_that!(Text::from(yaml), eq(&plural("%{count} item", "3")));
    }

    #[googletest::test]
    fn test_deserialize_through_serde() {
        let text: Text = serde_json::from_str(r#"{"one": "a", "other": "b"}"#).unwrap();

        expect_that!(text, eq(&plural("a", "b")));
        expect_that!(serde_json::to_value(&text).unwrap(), eq(&json!({"one": "a", "other": "b"})));
    }

    #[rstest]
    fn test_option_conversion() {
        assert_eq!(Text::from(None::<&str>), Text::Null);
        assert_eq!(Text::from(Some("x")), Text::from("x"));
    }
}
