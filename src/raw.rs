//! Field access helpers for raw response mappings.
//!
//! Two tiers live here. The `require_*` helpers are strict and report a
//! [`DataError`]; everything else is lenient and yields `None` for absent or
//! malformed values. Numbers may arrive as JSON numbers or as strings.

use crate::error::DataError;
use log::warn;
use serde_json::{Map, Value};

pub(crate) type RawMap = Map<String, Value>;

/// Placeholders the service uses instead of a number when no value exists.
const UNAVAILABLE: &[&str] = &["N/A", "Not Ranked", ""];

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

pub(crate) fn as_mapping(value: &Value) -> Result<&RawMap, DataError> {
    value.as_object().ok_or(DataError::NotAMapping {
        found: kind_of(value),
    })
}

fn is_unavailable(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => UNAVAILABLE.contains(&s.trim()),
        _ => false,
    }
}

pub(crate) fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

pub(crate) fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(_) => parse_int(value).map(|i| i != 0),
        Value::String(s) => match s.trim() {
            "1" | "true" | "True" => Some(true),
            "0" | "false" | "False" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn parse_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads `key` with `parse`, logging values that are present but unusable.
fn lenient<T>(map: &RawMap, key: &str, parse: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let value = map.get(key)?;
    let parsed = parse(value);
    if parsed.is_none() && !is_unavailable(value) {
        warn!("Ignoring malformed value for '{key}': {value}");
    }
    parsed
}

pub(crate) fn int_field<T: TryFrom<i64>>(map: &RawMap, key: &str) -> Option<T> {
    lenient(map, key, |v| parse_int(v).and_then(|i| T::try_from(i).ok()))
}

pub(crate) fn float_field(map: &RawMap, key: &str) -> Option<f64> {
    lenient(map, key, parse_float)
}

pub(crate) fn bool_field(map: &RawMap, key: &str) -> Option<bool> {
    lenient(map, key, parse_bool)
}

pub(crate) fn str_field(map: &RawMap, key: &str) -> Option<String> {
    lenient(map, key, parse_str)
}

/// Reads a nested mapping, treating anything else as absent.
pub(crate) fn map_field<'a>(map: &'a RawMap, key: &str) -> Option<&'a RawMap> {
    let value = map.get(key)?;
    if value.is_null() {
        return None;
    }
    let nested = value.as_object();
    if nested.is_none() {
        warn!("Ignoring '{key}' block: expected a mapping, found {}", kind_of(value));
    }
    nested
}

/// Reads a required integer identifier.
pub(crate) fn require_id(map: &RawMap, field: &'static str) -> Result<i64, DataError> {
    let value = match map.get(field) {
        None | Some(Value::Null) => return Err(DataError::MissingField { field }),
        Some(value) => value,
    };
    parse_int(value).ok_or_else(|| DataError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// Reads a required non-empty name, either a plain string or a mapping with
/// a `value` key.
pub(crate) fn require_name(map: &RawMap, field: &'static str) -> Result<String, DataError> {
    let value = match map.get(field) {
        None | Some(Value::Null) => return Err(DataError::MissingField { field }),
        Some(value) => value,
    };
    let name = match value {
        Value::Object(nested) => nested.get("value").and_then(Value::as_str),
        other => other.as_str(),
    };
    name.filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| DataError::InvalidField {
            field,
            value: value.to_string(),
        })
}
