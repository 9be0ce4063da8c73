//! Shared types for the marketplace services
//!
//! Common types used by the order service and the catalog mock: the unified
//! error system, wire models, roles and bearer-credential verification.

pub mod auth;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
