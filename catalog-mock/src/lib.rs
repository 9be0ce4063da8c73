//! catalog-mock: in-memory artwork service
//!
//! Serves the artwork endpoints the order service calls, for local runs and
//! end-to-end tests.

pub mod api;
pub mod store;

pub use api::{CatalogState, Latency, router};
pub use store::{ArtworkStore, MarkSoldError};
