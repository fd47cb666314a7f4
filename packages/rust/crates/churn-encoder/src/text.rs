//! Shared text helpers for the classifiers.

use regex::Regex;
use serde_json::Value;

/// Compile a hardcoded pattern, falling back to a never-matching regex.
pub(crate) fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(never) => never,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

/// Token separator: Unicode whitespace plus the ASCII information
/// separators U+001C..=U+001F, which `char::is_whitespace` leaves out.
pub(crate) fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Split on [`is_separator`], dropping empty pieces.
pub(crate) fn split_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|piece| !piece.is_empty())
}

/// Display form of a loose JSON value: strings unquoted, `null` as `None`,
/// everything else as compact JSON.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}
