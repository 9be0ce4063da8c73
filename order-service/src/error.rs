//! Order-service error type
//!
//! `OrderError` is what the workflow and query engines return. It keeps the
//! underlying [`CatalogError`] or `sqlx::Error` for logging, and converts into
//! the client-facing [`AppError`] at the HTTP boundary.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use shared::models::Role;
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("role '{role}' may not place orders")]
    Forbidden { role: Role },

    #[error("artwork {art_id} lookup failed: {source}")]
    ArtworkNotFound {
        art_id: i64,
        #[source]
        source: CatalogError,
    },

    #[error("artwork {art_id} is already sold")]
    AlreadySold { art_id: i64 },

    #[error("reservation of artwork {art_id} failed: {source}")]
    ReservationFailed {
        art_id: i64,
        #[source]
        source: CatalogError,
    },

    #[error("artwork listing failed: {source}")]
    UpstreamUnavailable {
        #[source]
        source: CatalogError,
    },

    #[error("order {order_id} not found")]
    NotFound { order_id: i64 },

    #[error("order store error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("order task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}

fn with_upstream(err: AppError, source: &CatalogError) -> AppError {
    let err = err.with_detail("retry_safe", source.is_transient());
    match source.upstream_status() {
        Some(status) => err.with_detail("upstream_status", status),
        None => err,
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Forbidden { role } => {
                AppError::forbidden(format!("Role '{role}' is not allowed to place orders"))
            }
            OrderError::ArtworkNotFound { art_id, source } => with_upstream(
                AppError::new(ErrorCode::ArtworkNotFound).with_detail("art_id", art_id),
                &source,
            ),
            OrderError::AlreadySold { art_id } => {
                AppError::new(ErrorCode::ArtworkAlreadySold).with_detail("art_id", art_id)
            }
            OrderError::ReservationFailed { art_id, source } => with_upstream(
                AppError::new(ErrorCode::ReservationFailed).with_detail("art_id", art_id),
                &source,
            ),
            OrderError::UpstreamUnavailable { source } => {
                with_upstream(AppError::new(ErrorCode::UpstreamUnavailable), &source)
            }
            OrderError::NotFound { order_id } => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", order_id)
            }
            OrderError::Storage(err) => {
                tracing::error!(error = %err, "Order store error");
                AppError::new(ErrorCode::DatabaseError)
            }
            OrderError::Task(err) => {
                tracing::error!(error = %err, "Order task failed");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
