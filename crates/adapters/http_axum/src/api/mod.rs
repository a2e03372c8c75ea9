//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod sensors;
pub mod sse;
pub mod values;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sensors", get(sensors::list))
        .route("/sensors/{key}", get(sensors::get))
        .route("/values", get(values::get))
        .route("/events/stream", get(sse::stream))
}
