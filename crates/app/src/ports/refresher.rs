//! Refresher: the contract the poll scheduler drives.

use std::future::Future;
use std::sync::Arc;

use vcontrol_domain::error::VControlError;
use vcontrol_domain::snapshot::ValueSnapshot;

/// Something that can run one refresh cycle on demand.
pub trait Refresher {
    /// Run one refresh and return the snapshot it published.
    ///
    /// A failed refresh still publishes a (stale) snapshot before returning
    /// the error.
    fn refresh(&self) -> impl Future<Output = Result<ValueSnapshot, VControlError>> + Send;
}

impl<T: Refresher + Send + Sync> Refresher for Arc<T> {
    fn refresh(&self) -> impl Future<Output = Result<ValueSnapshot, VControlError>> + Send {
        (**self).refresh()
    }
}
