//! Heat-pump port: read-only access to the device's HTTP API.
//!
//! A poll issues [`fetch_status`](HeatPumpApi::fetch_status) first and only
//! calls [`fetch_all_readings`](HeatPumpApi::fetch_all_readings) when the
//! device reported itself reachable. Field declarations are fetched once at
//! setup, independently of polling.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use vcontrol_domain::error::VControlError;
use vcontrol_domain::reading::Reading;

/// A field as declared by the device's `commands` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredField {
    pub name: String,
    pub unit: Option<String>,
    pub measurement: Option<String>,
}

/// Client for the heat pump's status API.
///
/// Every method is bounded by the adapter's request timeout; a timeout
/// surfaces as [`DeviceError::Timeout`](vcontrol_domain::error::DeviceError::Timeout).
pub trait HeatPumpApi {
    /// Lightweight reachability check. Succeeds only on HTTP 200.
    fn fetch_status(&self) -> impl Future<Output = Result<(), VControlError>> + Send;

    /// Full value dump keyed by raw field name.
    fn fetch_all_readings(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<String, Reading>, VControlError>> + Send;

    /// The device's declared list of available fields.
    fn fetch_available_fields(
        &self,
    ) -> impl Future<Output = Result<Vec<DeclaredField>, VControlError>> + Send;
}

impl<T: HeatPumpApi + Send + Sync> HeatPumpApi for Arc<T> {
    fn fetch_status(&self) -> impl Future<Output = Result<(), VControlError>> + Send {
        (**self).fetch_status()
    }

    fn fetch_all_readings(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<String, Reading>, VControlError>> + Send {
        (**self).fetch_all_readings()
    }

    fn fetch_available_fields(
        &self,
    ) -> impl Future<Output = Result<Vec<DeclaredField>, VControlError>> + Send {
        (**self).fetch_available_fields()
    }
}
