//! JSON handlers for declared sensors and their current values.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use vcontrol_domain::error::{NotFoundError, VControlError};
use vcontrol_domain::reading::RawValue;
use vcontrol_domain::sensor::{SensorDescriptor, SensorKey};
use vcontrol_domain::snapshot::ValueSnapshot;

use crate::error::ApiError;
use crate::state::AppState;

/// A declared sensor joined with its latest value.
#[derive(Debug, Serialize)]
pub struct SensorResponse {
    pub key: SensorKey,
    pub name: String,
    pub unit: Option<String>,
    pub measurement: Option<String>,
    /// `None` when the last successful poll did not report this field.
    pub value: Option<RawValue>,
    pub stale: bool,
}

impl SensorResponse {
    fn new(descriptor: &SensorDescriptor, snapshot: &ValueSnapshot) -> Self {
        Self {
            key: descriptor.key.clone(),
            name: descriptor.name.clone(),
            unit: descriptor.unit.clone(),
            measurement: descriptor.measurement.clone(),
            value: snapshot.get(&descriptor.key).cloned(),
            stale: snapshot.is_stale(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<SensorResponse>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<SensorResponse>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/sensors`
pub async fn list(State(state): State<AppState>) -> ListResponse {
    let snapshot = state.sensors.snapshot();
    let sensors = state
        .sensors
        .descriptors()
        .iter()
        .map(|descriptor| SensorResponse::new(descriptor, &snapshot))
        .collect();
    ListResponse::Ok(Json(sensors))
}

/// `GET /api/sensors/{key}`
pub async fn get(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<GetResponse, ApiError> {
    let key = SensorKey::parse(&key).map_err(VControlError::from)?;
    let descriptor = state.sensors.descriptor(&key).ok_or_else(|| {
        VControlError::from(NotFoundError {
            entity: "sensor",
            id: key.to_string(),
        })
    })?;
    let snapshot = state.sensors.snapshot();
    Ok(GetResponse::Ok(Json(SensorResponse::new(descriptor, &snapshot))))
}
