use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use vcontrol_app::ports::{DeclaredField, HeatPumpApi};
use vcontrol_domain::error::{DeviceError, MalformedResponseError, VControlError};
use vcontrol_domain::reading::Reading;

use crate::config::EndpointConfig;
use crate::error::{ClientError, transport_error};
use crate::parser;

const STATUS_PATH: &str = "/status";
const READINGS_PATH: &str = "/commands/all";
const FIELDS_PATH: &str = "/commands";

/// Client for the vcontrol REST bridge.
#[derive(Debug, Clone)]
pub struct VControlClient {
    base_url: String,
    timeout_secs: u64,
    client: Client,
}

impl VControlClient {
    /// Build a client bounded by `config.timeout_secs` per request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] for a blank host or a zero
    /// timeout, [`ClientError::Build`] if the HTTP client cannot be created.
    pub fn new(config: &EndpointConfig) -> Result<Self, ClientError> {
        if config.host.trim().is_empty() {
            return Err(ClientError::InvalidConfig("host must not be empty"));
        }
        if config.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig("timeout must be at least one second"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ClientError::Build)?;

        let base_url = config.base_url();
        tracing::info!(%base_url, timeout_secs = config.timeout_secs, "heat pump client ready");
        Ok(Self {
            base_url,
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `url` and return the body of a 200 answer.
    async fn get(&self, url: &str) -> Result<String, DeviceError> {
        tracing::debug!(url, "requesting");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error(url, self.timeout_secs, err))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(url, status = status.as_u16(), "unexpected status");
            return Err(DeviceError::Protocol {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|err| transport_error(url, self.timeout_secs, err))
    }
}

fn malformed(url: &str, source: MalformedResponseError) -> DeviceError {
    tracing::warn!(url, error = %source, "malformed response");
    DeviceError::MalformedResponse {
        endpoint: url.to_string(),
        source,
    }
}

impl HeatPumpApi for VControlClient {
    async fn fetch_status(&self) -> Result<(), VControlError> {
        self.get(&self.url(STATUS_PATH)).await?;
        Ok(())
    }

    async fn fetch_all_readings(&self) -> Result<BTreeMap<String, Reading>, VControlError> {
        let url = self.url(READINGS_PATH);
        let body = self.get(&url).await?;
        let readings = parser::parse_readings(&body).map_err(|err| malformed(&url, err))?;
        tracing::debug!(count = readings.len(), "readings fetched");
        Ok(readings)
    }

    async fn fetch_available_fields(&self) -> Result<Vec<DeclaredField>, VControlError> {
        let url = self.url(FIELDS_PATH);
        let body = self.get(&url).await?;
        let fields = parser::parse_fields(&body).map_err(|err| malformed(&url, err))?;
        tracing::debug!(count = fields.len(), "field declarations fetched");
        Ok(fields)
    }
}
