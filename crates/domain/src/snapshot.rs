//! Value snapshot: the latest value map published to downstream consumers.
//!
//! A snapshot is replaced as a whole on every refresh, so readers always see
//! the values of exactly one poll. A failed poll keeps the previous values
//! and marks the snapshot stale instead of clearing it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reading::RawValue;
use crate::sensor::SensorKey;
use crate::time::Timestamp;

/// Latest published values plus freshness metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueSnapshot {
    pub values: BTreeMap<SensorKey, RawValue>,
    /// Completion time of the last successful poll.
    pub last_success: Option<Timestamp>,
    /// Completion time of the last poll, successful or not.
    pub last_attempt: Option<Timestamp>,
    /// Number of failed polls since the last success.
    pub consecutive_failures: u32,
    /// Message of the most recent failure, cleared on success.
    pub last_error: Option<String>,
}

impl ValueSnapshot {
    /// Snapshot for a successful poll at `at`.
    #[must_use]
    pub fn fresh(values: BTreeMap<SensorKey, RawValue>, at: Timestamp) -> Self {
        Self {
            values,
            last_success: Some(at),
            last_attempt: Some(at),
            consecutive_failures: 0,
            last_error: None,
        }
    }

    /// Successor of `self` after a failed poll at `at`: values are retained.
    #[must_use]
    pub fn failed(&self, error: impl Into<String>, at: Timestamp) -> Self {
        Self {
            values: self.values.clone(),
            last_success: self.last_success,
            last_attempt: Some(at),
            consecutive_failures: self.consecutive_failures.saturating_add(1),
            last_error: Some(error.into()),
        }
    }

    /// Whether the values may be out of date: nothing was fetched yet, or
    /// the most recent poll failed.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.last_success.is_none() || self.consecutive_failures > 0
    }

    #[must_use]
    pub fn get(&self, key: &SensorKey) -> Option<&RawValue> {
        self.values.get(key)
    }
}
