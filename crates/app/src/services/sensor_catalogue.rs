//! Sensor catalogue loader: fetches the device's declared fields at setup.

use std::collections::BTreeSet;

use vcontrol_domain::error::VControlError;
use vcontrol_domain::sensor::SensorDescriptor;

use crate::ports::HeatPumpApi;

/// Turns the device's field declarations into [`SensorDescriptor`]s.
///
/// Runs exactly once per integration instance, before the first poll.
pub struct SensorCatalogueLoader<H> {
    api: H,
}

impl<H: HeatPumpApi> SensorCatalogueLoader<H> {
    pub fn new(api: H) -> Self {
        Self { api }
    }

    /// Fetch the declared fields and derive one descriptor per field.
    ///
    /// Declarations with an empty name are skipped; duplicate names keep the
    /// first declaration.
    ///
    /// # Errors
    ///
    /// Returns the device error unchanged; the caller treats it as fatal.
    pub async fn load(&self) -> Result<Vec<SensorDescriptor>, VControlError> {
        let fields = self.api.fetch_available_fields().await?;
        let declared = fields.len();

        let mut seen = BTreeSet::new();
        let mut descriptors = Vec::with_capacity(declared);
        for field in fields {
            let descriptor = match SensorDescriptor::new(field.name, field.unit, field.measurement)
            {
                Ok(descriptor) => descriptor,
                Err(err) => {
                    tracing::warn!(%err, "skipping field declaration");
                    continue;
                }
            };
            if !seen.insert(descriptor.key.clone()) {
                tracing::warn!(key = %descriptor.key, "duplicate field declaration ignored");
                continue;
            }
            descriptors.push(descriptor);
        }

        if descriptors.is_empty() {
            tracing::warn!("device declared no usable fields");
        }
        tracing::info!(declared, sensors = descriptors.len(), "sensor catalogue loaded");

        Ok(descriptors)
    }
}
