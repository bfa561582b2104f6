//! Flat `{{identifier}}` substitution for template payloads.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Matches `{{identifier}}` where the identifier is made of ASCII letters, digits and `_`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid placeholder regex"));

/// Replaces every `{{identifier}}` placeholder in `template` with its value from `vars`.
///
/// `vars` is expected to be a JSON object. Strings are inserted verbatim, other
/// scalars use their JSON representation, and identifiers that are missing or
/// `null` become the empty string. Substituted values are never scanned again.
///
/// # Arguments
/// * `template` - Template content
/// * `vars` - JSON object holding the variable values
///
/// # Returns
/// * `String` - Content with all placeholders resolved
pub fn interpolate(template: &str, vars: &serde_json::Value) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(serde_json::Value::String(value)) => value.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
        .into_owned()
}

/// Returns the identifiers of all placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
