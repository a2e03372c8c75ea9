//! # vcontrol-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HeatPumpApi`: status check, full value dump, field declarations
//!   - `CatalogueStore`: load & save the persisted field catalogue
//!   - `EventPublisher`: fan out domain events
//! - Define the `Refresher` contract the scheduler drives
//! - Provide the use-cases:
//!   - `SensorCatalogueLoader`: fetch the declared sensors once at setup
//!   - `RefreshCoordinator`: poll, detect drift, publish the value snapshot
//!   - `Poller`: fixed-interval refresh loop with graceful shutdown
//!   - `VControlIntegration`: setup / background / teardown lifecycle
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `vcontrol-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
