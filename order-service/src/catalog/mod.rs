//! Artwork (catalog) service client
//!
//! The catalog owns artwork records and the `is_sold` flag. This module is
//! the only place that talks to it; every failure is turned into a
//! [`CatalogError`] before it reaches the order engines.

mod http;

#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;
use shared::models::Artwork;
use thiserror::Error;

pub use http::HttpCatalogClient;

/// Failure talking to the catalog service.
///
/// Transport failure, timeout and a logical 404 stay distinct here even
/// though the order workflow currently collapses some of them into one
/// client-facing kind.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// No response within the configured timeout
    #[error("artwork service timed out")]
    Timeout,

    /// Connection refused, DNS failure, reset, ...
    #[error("artwork service unreachable: {0}")]
    Transport(String),

    /// The catalog answered 404
    #[error("artwork not found on artwork service")]
    NotFound,

    /// Any other non-success status
    #[error("artwork service answered {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Success status but the body did not match the artwork shape
    #[error("malformed artwork service response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// True when the request may never have been processed by the catalog
    /// (no response at all). Callers still must not retry a reservation on
    /// this basis alone: a timed-out `mark_sold` may have been applied.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport(_))
    }

    /// HTTP status the catalog answered with, when it answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::NotFound => Some(404),
            Self::Rejected { status, .. } => Some(*status),
            Self::Timeout | Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Operations the order engines need from the catalog.
///
/// Every call forwards the caller's bearer token unmodified so the catalog
/// can apply its own authorization.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// `GET /artworks/{id}`
    async fn get_artwork(&self, token: &str, art_id: i64) -> Result<Artwork, CatalogError>;

    /// `POST /artworks/{id}/mark_sold`. Not idempotent; never retry blindly.
    ///
    /// Any success status counts as reserved; the reply body is not read.
    async fn mark_sold(&self, token: &str, art_id: i64) -> Result<(), CatalogError>;

    /// `GET /artworks`, all pages
    async fn list_artworks(&self, token: &str) -> Result<Vec<Artwork>, CatalogError>;
}
