//! Shared application state for axum handlers.

use std::sync::Arc;

use vcontrol_app::event_bus::InProcessEventBus;
use vcontrol_app::services::sensor_view::SensorView;

/// Application state shared across all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Declared sensors and the latest value snapshot.
    pub sensors: SensorView,
    /// Event bus feeding the SSE stream.
    pub event_bus: Arc<InProcessEventBus>,
}

impl AppState {
    #[must_use]
    pub fn new(sensors: SensorView, event_bus: Arc<InProcessEventBus>) -> Self {
        Self { sensors, event_bus }
    }
}
