//! Request body validation.
//!
//! Bodies arrive as raw bytes and are turned into validated inputs here, so
//! that a wrong content type, broken JSON, or a wrong field type all produce
//! the same 400 `{"error": ...}` shape instead of a framework rejection.

use serde_json::{Map, Value};

use crate::error::ApiError;

/// Validated body of `POST /embed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
}

/// Validated body of `POST /embed-batch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInput {
    pub texts: Vec<String>,
}

impl TextInput {
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let missing = || ApiError::validation("Missing 'text' field");

        let object = parse_object(body)?.ok_or_else(missing)?;
        match object.get("text") {
            None => Err(missing()),
            Some(Value::String(text)) if !text.is_empty() => Ok(Self { text: text.clone() }),
            Some(_) => Err(ApiError::validation("'text' must be a non-empty string")),
        }
    }
}

impl BatchInput {
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let missing = || ApiError::validation("Missing 'texts' field");

        let object = parse_object(body)?.ok_or_else(missing)?;
        let items = match object.get("texts") {
            None => return Err(missing()),
            Some(Value::Array(items)) if !items.is_empty() => items,
            Some(_) => return Err(ApiError::validation("'texts' must be a non-empty array")),
        };

        let texts = items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(text) => Ok(text.clone()),
                _ => Err(ApiError::validation(format!(
                    "'texts' must contain only strings (item {} is not)",
                    i
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { texts })
    }
}

/// Parse a JSON object body. An empty body, `null` or `{}` yields `None`.
fn parse_object(body: &[u8]) -> Result<Option<Map<String, Value>>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::validation(format!("Request body is not valid JSON: {}", e)))?;
    match value {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        _ => Err(ApiError::validation("Request body must be a JSON object")),
    }
}
