//! # vcontrol-adapter-http-reqwest
//!
//! Heat pump client: implements the `HeatPumpApi` port over HTTP.
//!
//! ## Endpoints
//! All paths are relative to `<host>:<port><path>` (default path
//! `/api/vcontrol`):
//! - `GET /status`: reachability check, success only on HTTP 200
//! - `GET /commands/all`: full value dump, a JSON object keyed by field name
//! - `GET /commands`: declared fields, a JSON array
//!
//! Every request is bounded by the configured timeout. Failures are mapped to
//! [`DeviceError`](vcontrol_domain::error::DeviceError) kinds so callers can
//! tell an unreachable device from one that answered with garbage.

mod client;
mod config;
mod error;
pub mod parser;

pub use client::VControlClient;
pub use config::EndpointConfig;
pub use error::ClientError;
