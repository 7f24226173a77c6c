// Value normalization

use serde_json::Value;
use std::borrow::Cow;

/// Text form of a value, as used for pattern matching and stringification.
///
/// Strings are returned as-is, numbers and booleans in their literal form,
/// null as `"null"`, and arrays/objects as compact JSON.
pub(crate) fn text_form(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Number(n) => Cow::Owned(n.to_string()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Stateless value transforms.
///
/// The string transforms pass non-string values through unchanged.
pub struct Normalizer;

impl Normalizer {
    /// Trim leading and trailing whitespace
    pub fn trim(value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other.clone(),
        }
    }

    pub fn lowercase(value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_lowercase()),
            other => other.clone(),
        }
    }

    pub fn uppercase(value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other.clone(),
        }
    }

    /// Numeric coercion.
    ///
    /// Blank strings and null become `0`, booleans `1`/`0`; anything that
    /// does not parse as a number becomes `NaN`.
    pub fn to_number(value: &Value) -> f64 {
        match value {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Array(_) | Value::Object(_) => f64::NAN,
        }
    }

    /// String coercion
    pub fn to_string(value: &Value) -> String {
        text_form(value).into_owned()
    }

    /// Remove every whitespace character
    pub fn remove_spaces(value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.split_whitespace().collect()),
            other => other.clone(),
        }
    }
}
