//! Artwork Model
//!
//! Owned by the catalog service. The order service only reads it and asks
//! the catalog to flip `is_sold` from `false` to `true` exactly once.

use serde::{Deserialize, Serialize};

/// Artwork record as served by `GET /artworks/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artwork {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    /// Username of the artist who listed it
    pub owner: String,
    #[serde(default)]
    pub is_sold: bool,
}

/// Create artwork payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}
