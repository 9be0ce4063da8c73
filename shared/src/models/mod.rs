//! Data models
//!
//! Shared between the order service, the catalog mock and the browser UI.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod artwork;
pub mod order;
pub mod role;

// Re-exports
pub use artwork::*;
pub use order::*;
pub use role::*;
