//! Sensor keys and descriptors.
//!
//! Every field the heat pump exposes is published under a [`SensorKey`]
//! derived from its raw name (`Aussentemperatur` → `vcontrol_Aussentemperatur`).
//! The key is the only identifier downstream consumers ever see.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Prefix shared by every sensor key.
pub const SENSOR_KEY_PREFIX: &str = "vcontrol_";

/// Stable, prefixed identifier of a device field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SensorKey(String);

impl SensorKey {
    /// Derive the key for a raw device field name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFieldName`] when `name` is empty or
    /// only whitespace.
    pub fn from_field_name(name: &str) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyFieldName);
        }
        Ok(Self(format!("{SENSOR_KEY_PREFIX}{name}")))
    }

    /// Parse an already-prefixed key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSensorKey`] when the prefix is
    /// missing, or [`ValidationError::EmptyFieldName`] when nothing follows it.
    pub fn parse(key: &str) -> Result<Self, ValidationError> {
        let Some(name) = key.strip_prefix(SENSOR_KEY_PREFIX) else {
            return Err(ValidationError::InvalidSensorKey(key.to_string()));
        };
        Self::from_field_name(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SensorKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SensorKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SensorKey> for String {
    fn from(key: SensorKey) -> Self {
        key.0
    }
}

/// Static metadata for a field the device declares.
///
/// Loaded once at setup and immutable for the life of the integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorDescriptor {
    pub key: SensorKey,
    pub name: String,
    pub unit: Option<String>,
    pub measurement: Option<String>,
}

impl SensorDescriptor {
    /// Build a descriptor from the device's declaration of a field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFieldName`] when `name` is empty.
    pub fn new(
        name: impl Into<String>,
        unit: Option<String>,
        measurement: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let key = SensorKey::from_field_name(&name)?;
        Ok(Self {
            key,
            name,
            unit,
            measurement,
        })
    }
}
