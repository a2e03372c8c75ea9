use serde::{Deserialize, Serialize};

/// Where the vcontrol REST bridge listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Host name or address, optionally with a scheme (`http://` by default).
    pub host: String,
    /// Port as configured by the user; empty to omit it from the URL.
    pub port: String,
    /// Path prefix of the API.
    pub path: String,
    /// Per-request bound in seconds.
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: "5000".to_string(),
            path: "/api/vcontrol".to_string(),
            timeout_secs: 15,
        }
    }
}

impl EndpointConfig {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// `<scheme>://<host>:<port><path>` without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        let mut url = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };

        let port = self.port.trim();
        if !port.is_empty() {
            url.push(':');
            url.push_str(port);
        }

        let path = self.path.trim().trim_matches('/');
        if !path.is_empty() {
            url.push('/');
            url.push_str(path);
        }
        url
    }
}
