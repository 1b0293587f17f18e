//! Identifier normalization for synthesized type and field names.
//!
//! Display names coming out of user-authored config can contain arbitrary
//! punctuation, whitespace and casing. Before a name enters the schema it is
//! normalized: non-alphanumeric runs become word boundaries, words are
//! re-joined in PascalCase (type names) or lowerCamelCase (field names).
//! A name that is empty after normalization, or that would start with a
//! digit, is not a valid schema identifier and is rejected with `None` so
//! the caller can skip the field or group.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"));

/// Splits a raw display name into words on non-alphanumeric boundaries.
fn words(raw: &str) -> Vec<&str> {
    NON_ALNUM.split(raw).filter(|w| !w.is_empty()).collect()
}

fn ucfirst(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn lcfirst(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Formats a raw display name as a PascalCase type name.
///
/// Returns `None` if the name is empty after normalization or starts with a
/// digit, since the host schema's identifier rules reject both.
pub fn format_type_name(raw: &str) -> Option<String> {
    let formatted: String = words(raw).into_iter().map(ucfirst).collect();
    valid_identifier(formatted)
}

/// Formats a raw display name as a lowerCamelCase field name.
///
/// Same validity rules as [`format_type_name`].
pub fn format_field_name(raw: &str) -> Option<String> {
    let formatted: String = words(raw).into_iter().map(ucfirst).collect();
    valid_identifier(lcfirst(&formatted))
}

fn valid_identifier(formatted: String) -> Option<String> {
    match formatted.chars().next() {
        None => None,
        Some(c) if c.is_ascii_digit() => None,
        Some(_) => Some(formatted),
    }
}
