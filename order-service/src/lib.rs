//! order-service: places and lists artwork orders
//!
//! An order is placed by checking the artwork on the artwork service,
//! reserving it there (`mark_sold`), then recording the order locally.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod orders;
pub mod state;

pub use config::{CatalogConfig, Config};
pub use state::AppState;
