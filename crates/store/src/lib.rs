//! Persistence layer for the roster service.
//!
//! Wraps a SQLite database behind [`RegistryStore`]; everything above this
//! crate works in terms of the domain types from `roster-core` and never
//! sees SQL or rows.

pub mod error;
pub mod registry;

pub use error::StoreError;
pub use registry::RegistryStore;
