//! Interpolation variable extraction.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::locale::is_pluralization_data;
use crate::text::Text;

/// `{{name}}`
#[allow(clippy::expect_used)]
static MUSTACHE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid mustache pattern"));

/// `%{name}`
#[allow(clippy::expect_used)]
static PERCENT_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\{([A-Za-z0-9_]+)\}").expect("valid percent pattern"));

/// Variable supplied by the pluralization mechanism itself.
const COUNT_VARIABLE: &str = "count";

/// Collects the interpolation variables referenced anywhere in `text`.
///
/// Both `{{name}}` and `%{name}` are recognized. For pluralization maps the
/// `count` variable is left out even when a category mentions it.
///
/// # Examples
/// ```
/// use translation_guard::consistency::detect_variables;
/// use translation_guard::text::Text;
///
/// let variables = detect_variables(&Text::from("Hi {{name}}, you have %{total} messages"));
/// assert!(variables.contains("name"));
/// assert!(variables.contains("total"));
/// ```
#[must_use]
pub fn detect_variables(text: &Text) -> BTreeSet<String> {
    match text {
        Text::String(s) => scan(s),
        Text::List(items) => items.iter().flat_map(detect_variables).collect(),
        Text::Map(entries) => {
            let mut variables: BTreeSet<String> =
                entries.values().flat_map(detect_variables).collect();
            if is_pluralization_data(entries) {
                variables.remove(COUNT_VARIABLE);
            }
            variables
        }
        Text::Null | Text::Bool(_) => BTreeSet::new(),
    }
}

/// Scans a single string with each delimiter style.
fn scan(s: &str) -> BTreeSet<String> {
    [&*MUSTACHE_VARIABLE, &*PERCENT_VARIABLE]
        .into_iter()
        .flat_map(|pattern| pattern.captures_iter(s))
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}
