//! JSON handler for the full value snapshot.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use vcontrol_domain::snapshot::ValueSnapshot;

use crate::state::AppState;

/// The latest snapshot plus its derived staleness.
#[derive(Debug, Serialize)]
pub struct ValuesResponse {
    #[serde(flatten)]
    pub snapshot: ValueSnapshot,
    pub stale: bool,
}

/// `GET /api/values`
pub async fn get(State(state): State<AppState>) -> Json<ValuesResponse> {
    let snapshot = state.sensors.snapshot();
    let stale = snapshot.is_stale();
    Json(ValuesResponse { snapshot, stale })
}
