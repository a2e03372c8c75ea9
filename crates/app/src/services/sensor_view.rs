//! Read-only handle on the published sensors for downstream consumers.

use std::sync::Arc;

use tokio::sync::watch;

use vcontrol_domain::reading::RawValue;
use vcontrol_domain::sensor::{SensorDescriptor, SensorKey};
use vcontrol_domain::snapshot::ValueSnapshot;

/// Declared sensors plus a receiver on the latest value snapshot.
///
/// Cheap to clone. Readers never write; every read sees one whole snapshot.
#[derive(Debug, Clone)]
pub struct SensorView {
    descriptors: Arc<[SensorDescriptor]>,
    values: watch::Receiver<ValueSnapshot>,
}

impl SensorView {
    #[must_use]
    pub fn new(
        descriptors: impl Into<Arc<[SensorDescriptor]>>,
        values: watch::Receiver<ValueSnapshot>,
    ) -> Self {
        Self {
            descriptors: descriptors.into(),
            values,
        }
    }

    /// Sensors declared by the device at setup.
    #[must_use]
    pub fn descriptors(&self) -> &[SensorDescriptor] {
        &self.descriptors
    }

    #[must_use]
    pub fn descriptor(&self, key: &SensorKey) -> Option<&SensorDescriptor> {
        self.descriptors.iter().find(|desc| &desc.key == key)
    }

    /// Copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ValueSnapshot {
        self.values.borrow().clone()
    }

    /// Current value of one sensor.
    #[must_use]
    pub fn value(&self, key: &SensorKey) -> Option<RawValue> {
        self.values.borrow().get(key).cloned()
    }
}
