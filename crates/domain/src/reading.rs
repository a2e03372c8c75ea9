//! Readings: one field value returned by a poll.

use serde::{Deserialize, Serialize};

/// The `raw` value of a reading: the device reports numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    String(String),
}

/// One field returned by the device during a poll.
///
/// Unit and measurement are taken from the field declarations, not from the
/// value dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub name: String,
    pub raw: RawValue,
}
