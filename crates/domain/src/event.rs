//! Event: an immutable record of something that happened.
//!
//! Events are produced by the refresh coordinator and fanned out to
//! observers through the event bus.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalogue::Drift;
use crate::time::{Timestamp, now};

/// Random identifier of an [`Event`], unique per published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A poll succeeded and a new value snapshot was published.
    ValuesUpdated,
    /// A poll failed; the previous values are now stale.
    UpdateFailed,
    /// The device's field set differs from the persisted catalogue.
    CatalogueDrift,
}

impl EventType {
    /// Wire name, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValuesUpdated => "values_updated",
            Self::UpdateFailed => "update_failed",
            Self::CatalogueDrift => "catalogue_drift",
        }
    }
}

/// An event with a free-form JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(event_type: EventType, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            data,
            timestamp: now(),
        }
    }

    /// Advisory drift notification carrying the added/removed keys and a
    /// human-readable summary.
    #[must_use]
    pub fn drift(drift: &Drift) -> Self {
        Self::new(
            EventType::CatalogueDrift,
            serde_json::json!({
                "added": drift.added,
                "removed": drift.removed,
                "summary": drift.summary(),
            }),
        )
    }
}
