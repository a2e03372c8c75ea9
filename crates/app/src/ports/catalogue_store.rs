//! Catalogue store port: durable record of every field ever observed.

use std::future::Future;

use vcontrol_domain::catalogue::Catalogue;
use vcontrol_domain::error::VControlError;

/// Persists the [`Catalogue`] across restarts.
pub trait CatalogueStore {
    /// Load the stored catalogue; an empty one when nothing was saved yet.
    fn load(&self) -> impl Future<Output = Result<Catalogue, VControlError>> + Send;

    /// Replace the stored catalogue with `catalogue`. No merge.
    fn save(&self, catalogue: &Catalogue) -> impl Future<Output = Result<(), VControlError>> + Send;
}
