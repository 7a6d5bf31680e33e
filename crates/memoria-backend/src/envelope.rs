//! Response normalization.
//!
//! The backend wraps payloads inconsistently: sometimes `{"data": ...}`,
//! sometimes a named field (`{"memorials": [...]}` or
//! `{"data": {"memorials": [...]}}`), sometimes the bare value, and reports
//! failures as `{"success": false, "error": ...}`. Everything is decoded here
//! into one `ApiResult<T>`; nothing downstream looks at raw JSON.
//!
//! A payload that is missing is a `Decode` error, never an empty default.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiResult, BackendError};

/// Decode a body whose payload is the whole value or sits under `data`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    let value = parse(body)?;
    check_success(&value)?;
    let data = value.get("data").filter(|d| !d.is_null()).cloned();
    from_value(data.unwrap_or(value))
}

/// Decode a body whose payload is a named field, looked up as
/// `data.<field>`, then `<field>`, then `data`, then the bare value.
pub fn decode_field<T: DeserializeOwned>(body: &[u8], field: &str) -> ApiResult<T> {
    let value = parse(body)?;
    check_success(&value)?;

    let data = value.get("data").filter(|d| !d.is_null());
    let payload = data
        .and_then(|d| d.get(field))
        .or_else(|| value.get(field))
        .or(data)
        .filter(|p| !p.is_null())
        .cloned();
    from_value(payload.unwrap_or(value))
}

/// Extract a human-readable message from an error body, if it has one.
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    message_of(&value)
}

fn parse(body: &[u8]) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|e| BackendError::Decode(format!("invalid JSON: {e}")))
}

fn check_success(value: &Value) -> ApiResult<()> {
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = message_of(value).unwrap_or_else(|| "request was rejected".to_string());
        return Err(BackendError::Rejected(message));
    }
    Ok(())
}

fn message_of(value: &Value) -> Option<String> {
    let error = value.get("error").or_else(|| value.get("message"))?;
    match error {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => error
            .get("message")
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    }
}

fn from_value<T: DeserializeOwned>(payload: Value) -> ApiResult<T> {
    serde_json::from_value(payload).map_err(|e| BackendError::Decode(e.to_string()))
}
