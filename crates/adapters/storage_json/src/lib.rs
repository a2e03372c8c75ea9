//! # vcontrol-adapter-storage-json
//!
//! File persistence for the field catalogue.
//!
//! ## Responsibilities
//! - Implement the `CatalogueStore` port defined in `vcontrol-app::ports`
//! - Read and write the versioned catalogue document
//! - Replace the file atomically so a crash never leaves half a document
//!
//! ## Document format
//! ```json
//! {
//!   "version": 1,
//!   "key": "vcontrol.catalogue",
//!   "data": {
//!     "vcontrol_Aussentemperatur": {
//!       "name": "Aussentemperatur",
//!       "first_seen": "2024-06-01T12:00:00Z"
//!     }
//!   }
//! }
//! ```
//!
//! ## Dependency rule
//! Depends on `vcontrol-app` (for the port trait) and `vcontrol-domain`.
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod store;

pub use error::StorageError;
pub use store::{JsonCatalogueStore, STORAGE_KEY, STORAGE_VERSION};
