//! Decoding of the bridge's JSON bodies.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use vcontrol_app::ports::DeclaredField;
use vcontrol_domain::error::MalformedResponseError;
use vcontrol_domain::reading::{RawValue, Reading};

/// Decode the `/commands/all` body: an object keyed by field name whose
/// values carry at least a `raw` member.
///
/// Fields with a blank name are skipped, the same way declarations are.
///
/// # Errors
///
/// Fails on the first field that cannot be decoded; a poll is never
/// published partially.
pub fn parse_readings(body: &str) -> Result<BTreeMap<String, Reading>, MalformedResponseError> {
    let Value::Object(fields) = serde_json::from_str(body).map_err(MalformedResponseError::Json)?
    else {
        return Err(MalformedResponseError::UnexpectedShape { expected: "object" });
    };

    let mut readings = BTreeMap::new();
    for (name, value) in fields {
        if name.trim().is_empty() {
            tracing::warn!(?name, "skipping reading with a blank name");
            continue;
        }
        let raw = match value.get("raw") {
            None => return Err(MalformedResponseError::MissingRaw { field: name }),
            Some(raw) => parse_raw(raw).ok_or_else(|| MalformedResponseError::UnsupportedRaw {
                field: name.clone(),
            })?,
        };
        let reading = Reading {
            raw,
            name: name.clone(),
        };
        readings.insert(name, reading);
    }
    Ok(readings)
}

#[derive(Deserialize)]
struct FieldDeclaration {
    name: String,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default, alias = "type")]
    measurement: Option<String>,
}

/// Decode the `/commands` body: an array of `{name, measurement, unit}`.
///
/// Names are passed through as-is, validation happens when descriptors are
/// derived from them.
///
/// # Errors
///
/// Fails when the body is not an array or an element lacks a string `name`.
pub fn parse_fields(body: &str) -> Result<Vec<DeclaredField>, MalformedResponseError> {
    let Value::Array(items) = serde_json::from_str(body).map_err(MalformedResponseError::Json)?
    else {
        return Err(MalformedResponseError::UnexpectedShape { expected: "array" });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let decl: FieldDeclaration = serde_json::from_value(item)
                .map_err(|source| MalformedResponseError::InvalidDescriptor { index, source })?;
            Ok(DeclaredField {
                name: decl.name,
                unit: decl.unit,
                measurement: decl.measurement,
            })
        })
        .collect()
}

fn parse_raw(raw: &Value) -> Option<RawValue> {
    match raw {
        Value::Number(num) => num
            .as_i64()
            .map(RawValue::Int)
            .or_else(|| num.as_f64().map(RawValue::Float)),
        Value::String(text) => Some(RawValue::String(text.clone())),
        _ => None,
    }
}
