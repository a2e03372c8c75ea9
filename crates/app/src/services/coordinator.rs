//! Refresh coordinator: one poll cycle, drift detection and publishing.
//!
//! Each refresh checks the device status, fetches the full value dump,
//! reconciles the returned field set against the persisted catalogue and
//! replaces the published [`ValueSnapshot`] as a whole. Refreshes are
//! serialized: a refresh requested while another is in flight waits for it.

use std::collections::BTreeMap;

use tokio::sync::{Mutex, watch};

use vcontrol_domain::catalogue::{Catalogue, Drift};
use vcontrol_domain::error::VControlError;
use vcontrol_domain::event::{Event, EventType};
use vcontrol_domain::reading::{RawValue, Reading};
use vcontrol_domain::sensor::SensorKey;
use vcontrol_domain::snapshot::ValueSnapshot;
use vcontrol_domain::time::now;

use crate::ports::{CatalogueStore, EventPublisher, HeatPumpApi, Refresher};

/// Mutable state guarded by the refresh lock.
#[derive(Default)]
struct CoordinatorState {
    /// `None` until the catalogue was loaded from the store once.
    catalogue: Option<Catalogue>,
    /// Set when the in-memory catalogue holds entries not yet saved.
    unsaved: bool,
}

/// Owns the poll cycle and the latest value snapshot.
pub struct RefreshCoordinator<H, S, P> {
    api: H,
    store: S,
    publisher: P,
    state: Mutex<CoordinatorState>,
    values: watch::Sender<ValueSnapshot>,
}

impl<H, S, P> RefreshCoordinator<H, S, P>
where
    H: HeatPumpApi + Send + Sync,
    S: CatalogueStore + Send + Sync,
    P: EventPublisher + Send + Sync,
{
    /// Create a coordinator with an empty, stale snapshot.
    pub fn new(api: H, store: S, publisher: P) -> Self {
        let (values, _) = watch::channel(ValueSnapshot::default());
        Self {
            api,
            store,
            publisher,
            state: Mutex::new(CoordinatorState::default()),
            values,
        }
    }

    /// Subscribe to snapshot replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ValueSnapshot> {
        self.values.subscribe()
    }

    /// Copy of the currently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ValueSnapshot {
        self.values.borrow().clone()
    }

    /// Run one refresh cycle.
    ///
    /// On failure the previous values are kept, the snapshot is republished
    /// as stale and an [`EventType::UpdateFailed`] event is emitted.
    ///
    /// # Errors
    ///
    /// Returns the device error that made the poll fail.
    pub async fn refresh(&self) -> Result<ValueSnapshot, VControlError> {
        let mut state = self.state.lock().await;
        match self.poll(&mut state).await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                self.mark_failed(&err).await;
                Err(err)
            }
        }
    }

    async fn poll(&self, state: &mut CoordinatorState) -> Result<ValueSnapshot, VControlError> {
        if state.catalogue.is_none() {
            state.catalogue = Some(self.load_catalogue(&mut state.unsaved).await);
        }

        self.api.fetch_status().await?;
        let readings = self.api.fetch_all_readings().await?;
        let (observed, values) = flatten(readings);

        let catalogue = state.catalogue.get_or_insert_with(Catalogue::new);
        let drift = catalogue.reconcile(&observed, now());
        if !drift.added.is_empty() {
            state.unsaved = true;
        }
        if state.unsaved {
            self.persist(catalogue, &mut state.unsaved).await;
        }
        if !drift.is_empty() {
            self.notify_drift(&drift).await;
        }

        let snapshot = ValueSnapshot::fresh(values, now());
        self.values.send_replace(snapshot.clone());
        tracing::debug!(sensors = snapshot.values.len(), "value snapshot published");

        let event = Event::new(
            EventType::ValuesUpdated,
            serde_json::json!({ "count": snapshot.values.len() }),
        );
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(%err, "failed to publish values update");
        }

        Ok(snapshot)
    }

    /// Drift detection is advisory: an unreadable catalogue is replaced by an
    /// empty one, which the next save overwrites.
    async fn load_catalogue(&self, unsaved: &mut bool) -> Catalogue {
        match self.store.load().await {
            Ok(loaded) => {
                tracing::debug!(known = loaded.len(), "catalogue loaded from store");
                loaded
            }
            Err(err) => {
                tracing::warn!(
                    error = %error_chain(&err),
                    "failed to load catalogue, starting from an empty one"
                );
                *unsaved = true;
                Catalogue::new()
            }
        }
    }

    async fn persist(&self, catalogue: &Catalogue, unsaved: &mut bool) {
        match self.store.save(catalogue).await {
            Ok(()) => {
                *unsaved = false;
                tracing::debug!(known = catalogue.len(), "catalogue saved");
            }
            Err(err) => {
                tracing::warn!(%err, "failed to save catalogue, retrying on next refresh");
            }
        }
    }

    async fn notify_drift(&self, drift: &Drift) {
        tracing::info!(
            added = drift.added.len(),
            removed = drift.removed.len(),
            summary = %drift.summary(),
            "sensor set changed"
        );
        if let Err(err) = self.publisher.publish(Event::drift(drift)).await {
            tracing::warn!(%err, "failed to publish drift notification");
        }
    }

    async fn mark_failed(&self, err: &VControlError) {
        let message = error_chain(err);
        tracing::warn!(error = %message, "refresh failed, keeping previous values");

        let mut failures = 0;
        self.values.send_modify(|snapshot| {
            *snapshot = snapshot.failed(message.clone(), now());
            failures = snapshot.consecutive_failures;
        });

        let event = Event::new(
            EventType::UpdateFailed,
            serde_json::json!({
                "error": message,
                "consecutive_failures": failures,
            }),
        );
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(%err, "failed to publish update failure");
        }
    }
}

impl<H, S, P> Refresher for RefreshCoordinator<H, S, P>
where
    H: HeatPumpApi + Send + Sync,
    S: CatalogueStore + Send + Sync,
    P: EventPublisher + Send + Sync,
{
    async fn refresh(&self) -> Result<ValueSnapshot, VControlError> {
        RefreshCoordinator::refresh(self).await
    }
}

type Flattened = (BTreeMap<SensorKey, String>, BTreeMap<SensorKey, RawValue>);

/// Split readings into key → field name and key → raw value.
///
/// Fields whose name yields no key are skipped.
fn flatten(readings: BTreeMap<String, Reading>) -> Flattened {
    let mut observed = BTreeMap::new();
    let mut values = BTreeMap::new();
    for reading in readings.into_values() {
        let key = match SensorKey::from_field_name(&reading.name) {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(%err, name = %reading.name, "skipping reading");
                continue;
            }
        };
        observed.insert(key.clone(), reading.name);
        values.insert(key, reading.raw);
    }
    (observed, values)
}

/// Render an error with its sources, e.g. `device error: request to … timed out`.
fn error_chain(err: &VControlError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
