//! Value classification.

use crate::text::Text;

/// How a text value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    /// No value.
    Absent,
    /// A native boolean, or `t`/`f`.
    Boolean,
    /// A string made only of ASCII digits.
    Numeric,
    String,
    /// A list or a keyed structure such as a pluralization map.
    Structured,
}

/// Returns true for native booleans and for the strings `t` and `f`
/// (ignoring surrounding whitespace and case).
#[must_use]
pub fn is_boolean(text: &Text) -> bool {
    match text {
        Text::Bool(_) => true,
        Text::String(s) => matches!(s.trim().to_lowercase().as_str(), "t" | "f"),
        Text::Null | Text::List(_) | Text::Map(_) => false,
    }
}

/// Returns true for a non-empty string of ASCII digits.
#[must_use]
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[must_use]
pub fn classify(text: &Text) -> ValueClass {
    match text {
        Text::Null => ValueClass::Absent,
        Text::Bool(_) => ValueClass::Boolean,
        Text::String(_) if is_boolean(text) => ValueClass::Boolean,
        Text::String(s) if is_numeric(s) => ValueClass::Numeric,
        Text::String(_) => ValueClass::String,
        Text::List(_) | Text::Map(_) => ValueClass::Structured,
    }
}
