use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TeaError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidReference(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Not Authorized")]
    Unauthorized,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing failed")]
    PasswordHash,
}

impl From<figment::Error> for TeaError {
    fn from(e: figment::Error) -> Self {
        TeaError::Config(e.to_string())
    }
}

impl From<JsonRejection> for TeaError {
    fn from(rejection: JsonRejection) -> Self {
        TeaError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for TeaError {
    fn from(rejection: PathRejection) -> Self {
        TeaError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for TeaError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            TeaError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: msg,
                },
            ),
            TeaError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "CONFLICT".to_string(),
                    message: msg,
                },
            ),
            TeaError::InvalidReference(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "INVALID_REFERENCE".to_string(),
                    message: msg,
                },
            ),
            TeaError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message: msg,
                },
            ),
            TeaError::Unauthorized | TeaError::Token(_) => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Not Authorized".to_string(),
                },
            ),
            TeaError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message: "Incorrect username or password".to_string(),
                },
            ),
            TeaError::Database(_)
            | TeaError::StoreUnavailable(_)
            | TeaError::Config(_)
            | TeaError::PasswordHash => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_outcomes_map_to_distinct_statuses() {
        let cases = [
            (TeaError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (TeaError::Conflict("x".into()), StatusCode::CONFLICT),
            (TeaError::InvalidReference("x".into()), StatusCode::BAD_REQUEST),
            (TeaError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                TeaError::Database(SqlxError::PoolClosed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
