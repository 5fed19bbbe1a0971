//! Turns arbitrarily shaped error payloads into one display string.
//!
//! Handles the shapes the backend produces:
//! - `{"detail": "..."}` and `{"message": "..."}`
//! - `{"non_field_errors": ["..."]}`
//! - `{"field_name": ["...", "..."]}` rendered as `Field Name: ...`
//! - bare strings (possibly JSON-encoded), arrays, nested objects
//!
//! Object iteration follows insertion order (`serde_json` is built with
//! `preserve_order`), so messages appear in the order the server sent them.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

const MESSAGE_SEPARATOR: &str = ". ";
const UNLABELED_KEYS: [&str; 3] = ["detail", "non_field_errors", "message"];
const WORD_START_PATTERN: &str = r"\b\w";

static WORD_START_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_start_regex() -> &'static Regex {
    WORD_START_REGEX.get_or_init(|| Regex::new(WORD_START_PATTERN).expect("valid regex pattern"))
}

/// Normalize any JSON value into a human-readable message.
///
/// Total: every input shape produces a string, nothing panics.
pub fn normalize(value: &Value) -> String {
    match value {
        Value::Null => UNEXPECTED_ERROR_MESSAGE.to_string(),
        Value::String(text) => normalize_text(text),
        Value::Array(items) if items.is_empty() => UNEXPECTED_ERROR_MESSAGE.to_string(),
        Value::Array(items) => items
            .iter()
            .map(normalize)
            .collect::<Vec<_>>()
            .join(MESSAGE_SEPARATOR),
        Value::Object(fields) => normalize_object(fields),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
    }
}

/// Normalize a textual error.
///
/// Text that parses as JSON is normalized structurally; anything else is
/// returned verbatim.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return UNEXPECTED_ERROR_MESSAGE.to_string();
    }

    match serde_json::from_str::<Value>(text) {
        // A JSON string literal is unwrapped once, not re-parsed.
        Ok(Value::String(inner)) if inner.is_empty() => UNEXPECTED_ERROR_MESSAGE.to_string(),
        Ok(Value::String(inner)) => inner,
        Ok(parsed) => normalize(&parsed),
        Err(_) => text.to_string(),
    }
}

/// `snake_case` field name to `Title Case`.
pub fn format_field_name(field: &str) -> String {
    let spaced = field.replace('_', " ");
    word_start_regex()
        .replace_all(&spaced, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

fn normalize_object(fields: &Map<String, Value>) -> String {
    let messages: Vec<String> = fields
        .iter()
        .filter(|(_, value)| !is_blank(value))
        .map(|(key, value)| {
            if UNLABELED_KEYS.contains(&key.as_str()) {
                normalize(value)
            } else {
                format!("{}: {}", format_field_name(key), normalize(value))
            }
        })
        .collect();

    if messages.is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        messages.join(MESSAGE_SEPARATOR)
    }
}

/// Values that carry no message and are skipped inside objects.
///
/// `false` and `0` count as blank here, while at the top level
/// [`normalize`] still stringifies them: a bare scalar payload is the whole
/// message, a falsy field value is noise next to its siblings.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
