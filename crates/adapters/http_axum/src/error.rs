//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use vcontrol_domain::error::VControlError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`VControlError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(VControlError);

impl From<VControlError> for ApiError {
    fn from(err: VControlError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            VControlError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            VControlError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            VControlError::Device(err) => {
                tracing::warn!(error = %err, "device error");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            VControlError::Storage(_) | VControlError::Setup { .. } => {
                tracing::error!(error = %self.0, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
