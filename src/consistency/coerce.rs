//! Type coercion of translated values against the primary translation.
//!
//! Coercion never fails. Input that cannot be converted to the primary's type
//! degrades to a null value; rejecting it is left to validation.

use crate::consistency::classify::is_boolean;
use crate::text::Text;

/// YAML-style explicit null.
const EXPLICIT_NULL_LITERAL: &str = "~";

/// Result of a coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coerced {
    pub text: Text,
    /// The value was nulled on purpose and must not be reported as blank.
    pub explicit_null: bool,
}

impl Coerced {
    /// Keeps the value as is.
    const fn keep(text: Text) -> Self {
        Self { text, explicit_null: false }
    }

    /// An intentional null.
    const fn explicit_null() -> Self {
        Self { text: Text::Null, explicit_null: true }
    }
}

/// Normalizes a value assigned by an editor.
///
/// `primary` is the text of the primary translation, when this translation has one.
/// Strings are trimmed first when `strip_texts` is enabled. With a boolean primary,
/// the value then becomes a boolean or an explicit null.
#[must_use]
pub fn coerce_assignment(raw: Text, primary: Option<&Text>, strip_texts: bool) -> Coerced {
    let raw = match raw {
        Text::String(s) if strip_texts => Text::String(s.trim().to_string()),
        other => other,
    };

    if is_explicit_null_literal(&raw) {
        return Coerced::explicit_null();
    }

    if primary.is_some_and(is_boolean) {
        return coerce_boolean(&raw);
    }

    Coerced::keep(raw)
}

/// Brings a stored value in line with the type of the primary translation.
///
/// Runs before validation. A string is parsed as a YAML literal when the primary
/// is not a string; a value whose type still differs from the primary is dropped.
#[must_use]
pub fn align_with_primary(text: Text, primary: &Text) -> Coerced {
    if is_explicit_null_literal(&text) {
        return Coerced::explicit_null();
    }

    let text = match text {
        Text::String(s) if !matches!(primary, Text::String(_)) => parse_literal(&s),
        other => other,
    };

    if is_boolean(primary) {
        coerce_boolean(&text)
    } else if text.kind() == primary.kind() {
        Coerced::keep(text)
    } else {
        tracing::debug!(
            found = ?text.kind(),
            expected = ?primary.kind(),
            "Dropping value whose type differs from the primary translation"
        );
        Coerced::keep(Text::Null)
    }
}

/// Maps `true`/`t` and `false`/`f` to booleans, anything else to an explicit null.
#[must_use]
pub fn coerce_boolean(text: &Text) -> Coerced {
    match text.to_string().trim().to_lowercase().as_str() {
        "true" | "t" => Coerced::keep(Text::Bool(true)),
        "false" | "f" => Coerced::keep(Text::Bool(false)),
        _ => Coerced::explicit_null(),
    }
}

/// Returns true for the exact `~` literal.
#[must_use]
pub fn is_explicit_null_literal(text: &Text) -> bool {
    text.as_str() == Some(EXPLICIT_NULL_LITERAL)
}

/// Parses a structured literal such as `{one: "1 item", other: "%{count} items"}`.
fn parse_literal(s: &str) -> Text {
    match serde_yaml::from_str::<serde_yaml::Value>(s.trim()) {
        Ok(value) => Text::from(value),
        Err(e) => {
            tracing::warn!("Failed to parse structured literal: {e}");
            Text::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn plural(one: &str, other: &str) -> Text {
        Text::Map(BTreeMap::from([
            ("one".to_string(), Text::from(one)),
            ("other".to_string(), Text::from(other)),
        ]))
    }

    #[rstest]
    #[case::upper_t("T", Text::Bool(true))]
    #[case::padded_true("true ", Text::Bool(true))]
    #[case::upper_true("TRUE", Text::Bool(true))]
    #[case::f("f", Text::Bool(false))]
    #[case::false_word(" False", Text::Bool(false))]
    fn test_boolean_primary_parses_booleans(#[case] raw: &str, #[case] expected: Text) {
        let coerced = coerce_assignment(Text::from(raw), Some(&Text::Bool(true)), true);

        assert_eq!(coerced, Coerced { text: expected, explicit_null: false });
    }

    #[rstest]
    #[case::nonsense(Text::from("nonsense"))]
    #[case::empty(Text::from(""))]
    #[case::null(Text::Null)]
    #[case::number(Text::from(1_i64))]
    fn test_boolean_primary_degrades_to_explicit_null(#[case] raw: Text) {
        let coerced = coerce_assignment(raw, Some(&Text::from("t")), true);

        assert_eq!(coerced, Coerced::explicit_null());
    }

    #[rstest]
    fn test_native_boolean_stays_boolean() {
        let coerced = coerce_assignment(Text::Bool(false), Some(&Text::Bool(true)), false);

        assert_eq!(coerced.text, Text::Bool(false));
    }

    #[rstest]
    #[case::strip_enabled(true, "Bonjour")]
    #[case::strip_disabled(false, "  Bonjour \n")]
    fn test_strip_texts(#[case] strip_texts: bool, #[case] expected: &str) {
        let coerced =
            coerce_assignment(Text::from("  Bonjour \n"), Some(&Text::from("Hello")), strip_texts);

        assert_eq!(coerced.text, Text::from(expected));
        assert!(!coerced.explicit_null);
    }

    #[rstest]
    fn test_integer_is_stored_as_string() {
        let coerced = coerce_assignment(Text::from(42_i64), None, true);

        assert_eq!(coerced.text, Text::from("42"));
    }

    #[rstest]
    fn test_map_values_are_not_stripped() {
        let raw = plural(" one ", "other ");

        let coerced = coerce_assignment(raw.clone(), Some(&plural("a", "b")), true);

        assert_eq!(coerced.text, raw);
    }

    #[rstest]
    #[case::no_primary(None)]
    #[case::string_primary(Some(Text::from("Hello")))]
    #[case::boolean_primary(Some(Text::Bool(true)))]
    #[case::map_primary(Some(plural("a", "b")))]
    fn test_tilde_is_always_explicit_null(#[case] primary: Option<Text>) {
        for (raw, strip_texts) in [("~", false), ("~", true), (" ~ ", true)] {
            let coerced = coerce_assignment(Text::from(raw), primary.as_ref(), strip_texts);

            assert_eq!(coerced, Coerced::explicit_null());
        }
    }

    #[rstest]
    fn test_padded_tilde_is_text_without_strip() {
        let coerced = coerce_assignment(Text::from(" ~ "), Some(&Text::from("Hello")), false);

        assert_eq!(coerced, Coerced::keep(Text::from(" ~ ")));
        assert!(!is_explicit_null_literal(&coerced.text));
    }

    #[rstest]
    #[case::string("  Hello  ", None)]
    #[case::boolean("TRUE", Some(Text::Bool(true)))]
    #[case::nonsense("nonsense", Some(Text::Bool(false)))]
    #[case::tilde("~", Some(Text::from("x")))]
    #[case::integer("42", Some(Text::from("x")))]
    fn test_coercion_is_idempotent(#[case] raw: &str, #[case] primary: Option<Text>) {
        let once = coerce_assignment(Text::from(raw), primary.as_ref(), true);
        let twice = coerce_assignment(once.text.clone(), primary.as_ref(), true);

        assert_eq!(twice.text, once.text);
    }

    #[googletest::test]
    fn test_align_parses_plural_literal() {
        let primary = plural("1 item", "%{count} items");

        let aligned = align_with_primary(Text::from("{one: 1 item, other: many items}"), &primary);

        expect_that!(aligned.text, eq(&plural("1 item", "many items")));
        expect_that!(aligned.explicit_null, eq(false));
    }

    #[googletest::test]
    fn test_align_drops_unparseable_literal() {
        let aligned = align_with_primary(Text::from("{one: [unclosed"), &plural("a", "b"));

        expect_that!(aligned.text, eq(&Text::Null));
    }

    #[googletest::test]
    fn test_align_drops_plain_string_for_map_primary() {
        let aligned = align_with_primary(Text::from("just words"), &plural("a", "b"));

        expect_that!(aligned.text, eq(&Text::Null));
        expect_that!(aligned.explicit_null, eq(false));
    }

    #[googletest::test]
    fn test_align_drops_map_for_string_primary() {
        let aligned = align_with_primary(plural("a", "b"), &Text::from("Hello"));

        expect_that!(aligned.text, eq(&Text::Null));
    }

    #[rstest]
    #[case::true_word(Text::from("true"), Text::Bool(true))]
    #[case::t(Text::from("t"), Text::Bool(true))]
    #[case::native(Text::Bool(false), Text::Bool(false))]
    #[case::nonsense(Text::from("nonsense"), Text::Null)]
    fn test_align_with_boolean_primary(#[case] text: Text, #[case] expected: Text) {
        let aligned = align_with_primary(text, &Text::Bool(true));

        assert_eq!(aligned.text, expected);
    }

    #[rstest]
    fn test_align_keeps_matching_string() {
        let aligned = align_with_primary(Text::from("Bonjour"), &Text::from("Hello"));

        assert_eq!(aligned, Coerced::keep(Text::from("Bonjour")));
    }

    #[rstest]
    fn test_align_tilde_takes_precedence() {
        let aligned = align_with_primary(Text::from("~"), &plural("a", "b"));

        assert_eq!(aligned, Coerced::explicit_null());
    }
}
