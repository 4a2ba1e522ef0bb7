//! Parameter cleaning and query construction
//!
//! Hosts hand over loosely-typed parameter bags; these helpers apply the one
//! normalization rule the API contract relies on: absent, null, and
//! empty-string values are dropped, while `0`, `false`, and non-empty
//! strings are preserved.

use serde_json::{Map, Value};

use crate::error::ConnectorError;

/// Hard cap the API enforces on list endpoints; also the limit sent when the
/// caller asks for all records.
pub const MAX_LIMIT: u64 = 1000;
/// Limit used when the caller supplies none.
pub const DEFAULT_LIMIT: u64 = 50;

/// Drop entries whose value is null or an empty string.
pub fn clean_object(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(_, value)| !is_empty_value(value))
        .collect()
}

pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Keep only the named fields of a parameter object.
pub fn pick_fields(mut source: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|field| source.remove(*field).map(|value| (field.to_string(), value)))
        .collect()
}

/// Query-string pairs from a cleaned field map.
pub fn build_query(fields: Map<String, Value>) -> Vec<(String, String)> {
    clean_object(fields)
        .into_iter()
        .map(|(key, value)| (key, scalar_string(&value)))
        .collect()
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Effective list limit: the cap when all records are requested, otherwise
/// the caller's bound clamped to `[1, MAX_LIMIT]`.
pub fn effective_limit(return_all: bool, limit: Option<u64>) -> u64 {
    if return_all {
        MAX_LIMIT
    } else {
        limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// Parse a free-form data parameter: strings must hold valid JSON, objects
/// and arrays pass through.
pub fn parse_json_field(raw: &Value) -> Result<Value, ConnectorError> {
    match raw {
        Value::String(s) => {
            serde_json::from_str(s).map_err(|err| ConnectorError::InvalidJson(err.to_string()))
        }
        Value::Object(_) | Value::Array(_) => Ok(raw.clone()),
        other => Err(ConnectorError::InvalidJson(format!(
            "expected a JSON object or string, got {}",
            other
        ))),
    }
}

/// String value of a parameter; empty strings and nulls count as absent.
/// Numbers are accepted for identifier fields the host may pass as integers.
pub fn non_empty_string(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn bool_value(value: Option<Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => b,
        _ => default,
    }
}

/// Unsigned number value; numeric strings are accepted.
pub fn u64_value(value: Option<Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Object value of a parameter; anything else reads as an empty bag.
pub fn object_value(value: Option<Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
