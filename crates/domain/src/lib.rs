//! # vcontrol-domain
//!
//! Pure domain model for the vcontrol heat-pump integration.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **sensor keys** and **descriptors** (the fields a device declares)
//! - Define **readings** (one field value returned by a poll)
//! - Define the **catalogue** of every field ever observed, and **drift**
//!   detection against it
//! - Define the **value snapshot** published to downstream consumers
//! - Define **events** (value updates, failed polls, catalogue drift)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod catalogue;
pub mod event;
pub mod reading;
pub mod sensor;
pub mod snapshot;
