//! Unified error codes for the marketplace services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Catalog (remote artwork) errors
//! - 4xxx: Order errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (the browser UI reads them too).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// No credential was presented
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Role not permitted for the action
    PermissionDenied = 2001,

    // ==================== 3xxx: Catalog ====================
    /// Remote artwork lookup failed or returned not-found
    ArtworkNotFound = 3001,
    /// Remote artwork is already sold
    ArtworkAlreadySold = 3002,
    /// Remote reservation call rejected or timed out
    ReservationFailed = 3003,
    /// Remote artwork listing unavailable
    UpstreamUnavailable = 3004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Stable machine-readable kind, surfaced to clients next to the number.
    pub const fn kind(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::NotFound | ErrorCode::OrderNotFound => "not_found",

            ErrorCode::NotAuthenticated | ErrorCode::TokenExpired | ErrorCode::TokenInvalid => {
                "unauthorized"
            }
            ErrorCode::PermissionDenied => "forbidden",

            ErrorCode::ArtworkNotFound => "artwork_not_found",
            ErrorCode::ArtworkAlreadySold => "already_sold",
            ErrorCode::ReservationFailed => "reservation_failed",
            ErrorCode::UpstreamUnavailable => "upstream_unavailable",

            ErrorCode::InternalError | ErrorCode::DatabaseError => "internal",
        }
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Token expired",
            ErrorCode::TokenInvalid => "Invalid token",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Catalog
            ErrorCode::ArtworkNotFound => "Artwork not found",
            ErrorCode::ArtworkAlreadySold => "Artwork already sold",
            ErrorCode::ReservationFailed => "Failed to reserve artwork",
            ErrorCode::UpstreamUnavailable => "Artwork service unavailable",

            // Order
            ErrorCode::OrderNotFound => "Order not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Catalog
            3001 => Ok(ErrorCode::ArtworkNotFound),
            3002 => Ok(ErrorCode::ArtworkAlreadySold),
            3003 => Ok(ErrorCode::ReservationFailed),
            3004 => Ok(ErrorCode::UpstreamUnavailable),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
