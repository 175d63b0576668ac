//! Typed accessors over JSON document values
//!
//! Every `from_doc` constructor reads fields through these helpers so that
//! missing-field and wrong-type errors carry a consistent shape.

use crate::document::error::DocumentError;
use serde_json::Value;

/// Fetch a required field from a JSON object
pub fn require<'a>(doc: &'a Value, field: &str) -> Result<&'a Value, DocumentError> {
    doc.get(field).ok_or_else(|| DocumentError::MissingField {
        field: field.to_string(),
    })
}

/// Fetch an optional field; JSON null counts as absent
pub fn optional<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    match doc.get(field) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

pub fn as_str<'a>(value: &'a Value, field: &str) -> Result<&'a str, DocumentError> {
    value.as_str().ok_or_else(|| DocumentError::WrongType {
        field: field.to_string(),
        expected: "string",
    })
}

pub fn as_array<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>, DocumentError> {
    value.as_array().ok_or_else(|| DocumentError::WrongType {
        field: field.to_string(),
        expected: "array",
    })
}

pub fn as_object<'a>(
    value: &'a Value,
    field: &str,
) -> Result<&'a serde_json::Map<String, Value>, DocumentError> {
    value.as_object().ok_or_else(|| DocumentError::WrongType {
        field: field.to_string(),
        expected: "object",
    })
}

pub fn as_bool(value: &Value, field: &str) -> Result<bool, DocumentError> {
    value.as_bool().ok_or_else(|| DocumentError::WrongType {
        field: field.to_string(),
        expected: "boolean",
    })
}

pub fn as_u64(value: &Value, field: &str) -> Result<u64, DocumentError> {
    value.as_u64().ok_or_else(|| DocumentError::WrongType {
        field: field.to_string(),
        expected: "unsigned integer",
    })
}

/// Read a field that identifier-like producers write as either a JSON number
/// or a string (view ids in particular)
pub fn as_id_string(value: &Value, field: &str) -> Result<String, DocumentError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        _ => Err(DocumentError::WrongType {
            field: field.to_string(),
            expected: "string or number",
        }),
    }
}
