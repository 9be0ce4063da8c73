//! Caller extractor
//!
//! Verifies the bearer credential and keeps the raw token so the engines
//! can forward it unmodified to the artwork service.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::auth::bearer_claims;
use shared::error::AppError;
use shared::models::Role;

use crate::state::AppState;

/// Authenticated caller of an order route
#[derive(Clone)]
pub struct Caller {
    pub subject: String,
    pub role: Role,
    pub token: String,
}

impl Caller {
    pub fn new(subject: impl Into<String>, role: Role, token: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            role,
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for Caller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Caller")
            .field("subject", &self.subject)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(caller) = parts.extensions.get::<Caller>() {
            return Ok(caller.clone());
        }

        let (token, claims) = bearer_claims(&parts.headers, &state.jwt)?;
        let caller = Caller {
            role: claims.role(),
            subject: claims.sub,
            token,
        };
        parts.extensions.insert(caller.clone());
        Ok(caller)
    }
}
