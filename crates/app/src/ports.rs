//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod catalogue_store;
pub mod event_bus;
pub mod heat_pump;
pub mod refresher;

pub use catalogue_store::CatalogueStore;
pub use event_bus::EventPublisher;
pub use heat_pump::{DeclaredField, HeatPumpApi};
pub use refresher::Refresher;
