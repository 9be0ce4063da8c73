//! Bearer header handling shared by the service extractors

use http::HeaderMap;

use super::{Claims, JwtError, JwtService};
use crate::error::AppError;

/// Pull the bearer token out of `Authorization` and verify it.
///
/// Returns the raw token (for forwarding to other services) with its claims.
pub fn bearer_claims(
    headers: &HeaderMap,
    jwt: &JwtService,
) -> Result<(String, Claims), AppError> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!("request without Authorization header");
            AppError::unauthorized()
        })?;

    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    match jwt.validate_token(token) {
        Ok(claims) => Ok((token.to_string(), claims)),
        Err(e) => {
            tracing::warn!(error = %e, "bearer token rejected");
            match e {
                JwtError::Expired => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
