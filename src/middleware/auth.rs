use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};
use std::sync::Arc;
use tracing::debug;

use crate::auth::TokenService;
use crate::error::TeaError;

/// Pull the bearer token from the request.
/// Accepts either:
/// - Header: `Token: <jwt>`
/// - Header: `Authorization: Bearer <jwt>`
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(token) = headers.get("token").and_then(|v| v.to_str().ok()) {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token);
        }
    }

    let auth = headers.get("authorization").and_then(|v| v.to_str().ok())?;
    let auth = auth.trim();
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Guard for routes that need a signed-in user; yields the token's username.
#[derive(Debug, Clone)]
pub struct RequireToken(pub String);

impl<S> FromRequestParts<S> for RequireToken
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = TeaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(&parts.headers) else {
            debug!(path = %parts.uri.path(), "request without token");
            return Err(TeaError::Unauthorized);
        };
        let tokens = Arc::<TokenService>::from_ref(state);
        let username = tokens.verify(token).map_err(|e| {
            debug!(path = %parts.uri.path(), error = %e, "rejected token");
            TeaError::Unauthorized
        })?;
        Ok(Self(username))
    }
}
