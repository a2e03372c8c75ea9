//! Wall-clock timestamps.
//!
//! Catalogue entries, snapshots and events all record UTC instants and
//! serialize them as RFC 3339 strings.

use chrono::{DateTime, Utc};

pub type Timestamp = DateTime<Utc>;

#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
