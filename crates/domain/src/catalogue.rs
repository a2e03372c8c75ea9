//! Catalogue: every field identifier ever observed on the device.
//!
//! The catalogue is persisted between runs and compared against each poll
//! to detect schema drift. Entries are only ever added: a field that
//! disappears from the device is reported as removed but kept on record.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::sensor::SensorKey;
use crate::time::Timestamp;

/// Persisted record of a field the device has reported at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub name: String,
    pub first_seen: Timestamp,
}

/// Ordered set of catalogue entries keyed by sensor key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    entries: BTreeMap<SensorKey, CatalogueEntry>,
}

impl Catalogue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_entries(entries: BTreeMap<SensorKey, CatalogueEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &SensorKey) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &SensorKey) -> Option<&CatalogueEntry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn entries(&self) -> &BTreeMap<SensorKey, CatalogueEntry> {
        &self.entries
    }

    /// Compare the catalogue against the keys observed in a poll.
    ///
    /// Pure: the catalogue is left untouched.
    #[must_use]
    pub fn diff(&self, observed: &BTreeSet<SensorKey>) -> Drift {
        let added = observed
            .iter()
            .filter(|key| !self.entries.contains_key(*key))
            .cloned()
            .collect();
        let removed = self
            .entries
            .keys()
            .filter(|key| !observed.contains(*key))
            .cloned()
            .collect();
        Drift { added, removed }
    }

    /// Diff against `observed` (key → raw field name) and record every
    /// added key with `first_seen = now`.
    ///
    /// Removed keys stay in the catalogue.
    pub fn reconcile(&mut self, observed: &BTreeMap<SensorKey, String>, now: Timestamp) -> Drift {
        let keys: BTreeSet<SensorKey> = observed.keys().cloned().collect();
        let drift = self.diff(&keys);
        for key in &drift.added {
            if let Some(name) = observed.get(key) {
                self.entries.insert(
                    key.clone(),
                    CatalogueEntry {
                        name: name.clone(),
                        first_seen: now,
                    },
                );
            }
        }
        drift
    }
}

/// Difference between a poll's key set and the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drift {
    pub added: BTreeSet<SensorKey>,
    pub removed: BTreeSet<SensorKey>,
}

impl Drift {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Human-readable one-line summary, e.g.
    /// `new sensors: vcontrol_C; removed sensors: vcontrol_A`.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "no sensor changes".to_string();
        }
        let mut out = String::new();
        if !self.added.is_empty() {
            let _ = write!(out, "new sensors: {}", join(&self.added));
        }
        if !self.removed.is_empty() {
            if !out.is_empty() {
                out.push_str("; ");
            }
            let _ = write!(out, "removed sensors: {}", join(&self.removed));
        }
        out
    }
}

fn join(keys: &BTreeSet<SensorKey>) -> String {
    keys.iter()
        .map(SensorKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
