use vcontrol_domain::error::DeviceError;

/// Errors raised while building the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid endpoint configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
}

/// Map a transport failure on `endpoint` to the matching device error.
pub(crate) fn transport_error(
    endpoint: &str,
    timeout_secs: u64,
    err: reqwest::Error,
) -> DeviceError {
    if err.is_timeout() {
        tracing::warn!(endpoint, timeout_secs, "request timed out");
        DeviceError::Timeout {
            endpoint: endpoint.to_string(),
            timeout_secs,
        }
    } else {
        tracing::warn!(endpoint, error = %err, "device unreachable");
        DeviceError::Unreachable {
            endpoint: endpoint.to_string(),
            source: Box::new(err),
        }
    }
}
