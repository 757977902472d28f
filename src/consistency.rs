//! Translation consistency engine.
//!
//! Keeps a translation aligned with the translation of the primary locale:
//! the same substitution variables, the same value type, and a blank check that
//! knows about intentional nulls.

/// Value classification
pub mod classify;
/// Type coercion against the primary translation
pub mod coerce;
/// Validation rules and errors
pub mod validate;
/// Interpolation variable extraction
pub mod variables;

pub use classify::{
    ValueClass,
    classify,
    is_boolean,
};
pub use coerce::{
    Coerced,
    align_with_primary,
    coerce_assignment,
};
pub use validate::{
    ErrorKind,
    Field,
    TranslationError,
    ValidationErrors,
};
pub use variables::detect_variables;
