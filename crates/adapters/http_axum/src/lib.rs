//! # vcontrol-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **read-only JSON API** over the published sensors
//!   (`/api/sensors`, `/api/values`)
//! - Stream domain events as **Server-Sent Events** (`/api/events/stream`)
//! - Map domain errors into HTTP responses
//!
//! Nothing here writes to the device or the catalogue: handlers only read
//! the latest value snapshot through a
//! [`SensorView`](vcontrol_app::services::sensor_view::SensorView).
//!
//! ## Dependency rule
//! Depends on `vcontrol-app` (for the sensor view and event bus) and
//! `vcontrol-domain` (for response mapping). Never leaks axum types into the
//! domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
