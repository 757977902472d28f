//! Validation rules of a translation against its primary translation.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::consistency::variables::detect_variables;
use crate::text::Text;

/// Attribute of the translation an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Text,
    Variables,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Variables => "variables",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text is null where a value is required.
    Blank,
    /// The primary translation has no substitutions but this one does.
    UnexpectedVariables { found: BTreeSet<String> },
    /// The substitutions differ from the primary translation's.
    VariableMismatch { expected: BTreeSet<String>, found: BTreeSet<String> },
}

/// A validation failure attached to one field of a translation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {}", describe(.kind))]
pub struct TranslationError {
    pub field: Field,
    pub kind: ErrorKind,
}

impl TranslationError {
    #[must_use]
    pub const fn blank() -> Self {
        Self { field: Field::Text, kind: ErrorKind::Blank }
    }

    #[must_use]
    pub fn message(&self) -> String {
        describe(&self.kind)
    }
}

/// Human readable message of an error kind.
fn describe(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::Blank => "can't be blank".to_string(),
        ErrorKind::UnexpectedVariables { .. } => {
            "The primary translation does not contain substitutions, so this should neither."
                .to_string()
        }
        ErrorKind::VariableMismatch { expected, found } => format!(
            "The translation should contain the substitutions of the primary translation: ({}), found ({}).",
            join(expected),
            join(found)
        ),
    }
}

/// Errors that kept a translation from being saved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Translation is invalid:\n{}", format_translation_errors(.0))]
pub struct ValidationErrors(pub Vec<TranslationError>);

impl ValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[TranslationError] {
        &self.0
    }
}

/// Numbered list, one error per line.
fn format_translation_errors(errors: &[TranslationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field, err.message()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comma separated variable names.
fn join(variables: &BTreeSet<String>) -> String {
    variables.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Checks that `text` uses exactly the substitutions of the primary text.
#[must_use]
pub fn check_variables(text: &Text, primary: &Text) -> Option<TranslationError> {
    let expected = detect_variables(primary);
    let found = detect_variables(text);

    if found == expected {
        return None;
    }

    let kind = if expected.is_empty() {
        ErrorKind::UnexpectedVariables { found }
    } else {
        ErrorKind::VariableMismatch { expected, found }
    };
    Some(TranslationError { field: Field::Variables, kind })
}

/// Facts the blank check depends on.
#[derive(Debug, Clone, Copy)]
pub struct BlankContext<'a> {
    /// Text of the primary translation, if this translation has one.
    pub primary: Option<&'a Text>,
    pub explicit_null: bool,
    pub boolean_typed: bool,
}

/// Reports a null text unless null is a legitimate state here.
///
/// Null is accepted when the primary text is blank as well, when the value was
/// nulled on purpose, or for boolean-typed translations.
#[must_use]
pub fn check_not_blank(text: &Text, context: BlankContext<'_>) -> Option<TranslationError> {
    if !text.is_null() {
        return None;
    }
    let primary_blank = context.primary.is_some_and(Text::is_blank);
    if primary_blank || context.explicit_null || context.boolean_typed {
        return None;
    }
    Some(TranslationError::blank())
}
