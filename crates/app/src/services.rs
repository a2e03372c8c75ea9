//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod coordinator;
pub mod integration;
pub mod poller;
pub mod sensor_catalogue;
pub mod sensor_view;
