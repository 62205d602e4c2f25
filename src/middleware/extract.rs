//! `Json` and `Path` wrappers whose rejections use the API error body.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::TeaError;

/// JSON request body; a malformed payload is a `BadRequest`.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = TeaError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_string();
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!(%path, error = %rejection.body_text(), "rejected request body");
            TeaError::from(rejection)
        })?;
        Ok(Self(value))
    }
}

/// Typed path parameters; an unparsable segment is a `BadRequest`.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = TeaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
