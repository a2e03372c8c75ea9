//! Common error types used across the workspace.
//!
//! [`VControlError`] is the type crossing port boundaries. Each adapter keeps
//! its own error enum and converts into this one, so callers can tell a
//! device that is unreachable apart from one that answered with garbage.

use std::fmt;

/// Boxed error used where the concrete source lives in an adapter crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for every fallible operation in vcontrol.
#[derive(Debug, thiserror::Error)]
pub enum VControlError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A requested item does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Talking to the heat pump failed.
    #[error("device error")]
    Device(#[from] DeviceError),

    /// The catalogue store failed to load or save.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// Integration setup aborted; the instance must not be used.
    #[error("setup failed while {stage}")]
    Setup {
        stage: SetupStage,
        #[source]
        source: Box<VControlError>,
    },
}

impl VControlError {
    /// Wrap `self` as a fatal setup failure at `stage`.
    #[must_use]
    pub fn during_setup(self, stage: SetupStage) -> Self {
        Self::Setup {
            stage,
            source: Box::new(self),
        }
    }

    /// Access the device error, if this is one.
    #[must_use]
    pub fn as_device(&self) -> Option<&DeviceError> {
        match self {
            Self::Device(err) => Some(err),
            Self::Setup { source, .. } => source.as_device(),
            _ => None,
        }
    }
}

/// Invariant violations for domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field name must not be empty")]
    EmptyFieldName,

    #[error("sensor key `{0}` does not start with `vcontrol_`")]
    InvalidSensorKey(String),
}

/// Lookup failure for a named item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Failure talking to the heat pump's HTTP API.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The connection could not be established.
    #[error("device unreachable at {endpoint}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    /// The request did not complete within the configured bound.
    #[error("request to {endpoint} timed out after {timeout_secs}s")]
    Timeout { endpoint: String, timeout_secs: u64 },

    /// The device answered with a non-200 status.
    #[error("{endpoint} answered with HTTP {status}")]
    Protocol { endpoint: String, status: u16 },

    /// The device answered 200 but the body could not be decoded.
    #[error("malformed response from {endpoint}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: MalformedResponseError,
    },
}

/// Details about why a response body could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum MalformedResponseError {
    /// The body is not valid JSON.
    #[error("invalid JSON body")]
    Json(#[source] serde_json::Error),

    /// The body is valid JSON but of the wrong shape.
    #[error("expected a JSON {expected}")]
    UnexpectedShape { expected: &'static str },

    /// A reading object carries no `raw` member.
    #[error("reading `{field}` has no `raw` value")]
    MissingRaw { field: String },

    /// A reading's `raw` member is neither a number nor a string.
    #[error("reading `{field}` has an unsupported `raw` value")]
    UnsupportedRaw { field: String },

    /// A field descriptor could not be decoded.
    #[error("invalid field descriptor at index {index}")]
    InvalidDescriptor {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Step of the integration setup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStage {
    LoadSensors,
    FirstRefresh,
}

impl fmt::Display for SetupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadSensors => f.write_str("loading sensor descriptors"),
            Self::FirstRefresh => f.write_str("running the first refresh"),
        }
    }
}
