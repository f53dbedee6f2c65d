//! Request body decoding.
//!
//! Clients send JSON either as a raw body (with or without a JSON content
//! type) or as the single key of a form-encoded body. Entity writes may
//! additionally wrap the record under a top-level `body` key.

use crate::api::ApiError;
use crate::world::{Record, World};
use axum::http::{header, HeaderMap};
use serde_json::Value;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decode a request body into a JSON value, enforcing the size limit
pub fn parse_json(headers: &HeaderMap, body: &[u8], limit: usize) -> Result<Value, ApiError> {
    if body.len() > limit {
        return Err(ApiError::PayloadTooLarge);
    }

    if is_form(headers) {
        return parse_form(body);
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MalformedInput("request body is empty".to_string()));
    }

    serde_json::from_slice(body).map_err(|e| ApiError::MalformedInput(e.to_string()))
}

/// Record for an entity write; `{"body": {...}}` and `{...}` are both accepted
pub fn entity_record(value: Value) -> Result<Record, ApiError> {
    let mut object = into_object(value, "entity record")?;
    match object.remove("body") {
        Some(inner) => into_object(inner, "entity record"),
        None => Ok(object),
    }
}

/// Whole world for a bulk replace: an object of entity objects
pub fn world(value: Value) -> Result<World, ApiError> {
    into_object(value, "world")?
        .into_iter()
        .map(|(entity_id, record)| {
            let record = into_object(record, &format!("entity '{entity_id}'"))?;
            Ok((entity_id, record))
        })
        .collect()
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .map(|media_type| media_type.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

/// The JSON document is the first form key (value ignored)
fn parse_form(body: &[u8]) -> Result<Value, ApiError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| ApiError::MalformedInput(e.to_string()))?;

    let (key, _) = pairs
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::MalformedInput("form body has no fields".to_string()))?;

    serde_json::from_str(&key).map_err(|e| ApiError::MalformedInput(e.to_string()))
}

fn into_object(value: Value, what: &str) -> Result<Record, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::MalformedInput(format!(
            "{what} must be a JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
