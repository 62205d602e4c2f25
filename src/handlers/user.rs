use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ResultResponse;
use crate::auth::{hash_password, verify_password};
use crate::db::UserLogin;
use crate::error::TeaError;
use crate::middleware::{ApiJson, RequireToken};
use crate::router::AppState;

/// Old and new password for `POST /changepassword`.
#[derive(Debug, Deserialize)]
pub struct NewPasswordRequest {
    pub old: String,
    pub new: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(login): ApiJson<UserLogin>,
) -> Result<Json<TokenResponse>, TeaError> {
    let username = login.username.trim().to_lowercase();

    let stored = match state.users.get_password_hash(&username).await {
        Ok(hash) => hash,
        Err(TeaError::NotFound(_)) => {
            warn!(%username, "login for unknown user");
            return Err(TeaError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };
    verify_password(&login.password, &stored).inspect_err(|_| {
        warn!(%username, "incorrect password");
    })?;

    let token = state.tokens.issue(&username)?;
    info!(%username, "logged in");
    Ok(Json(TokenResponse { token }))
}

/// POST /register, only routed when registration is enabled.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(login): ApiJson<UserLogin>,
) -> Result<Json<TokenResponse>, TeaError> {
    let username = login.username.trim().to_lowercase();
    if username.is_empty() || login.password.is_empty() {
        return Err(TeaError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let hash = hash_password(&login.password)?;
    state.users.create_user(&username, &hash).await?;

    let token = state.tokens.issue(&username)?;
    info!(%username, "registered and logged in");
    Ok(Json(TokenResponse { token }))
}

/// POST /changepassword
pub async fn change_password(
    RequireToken(username): RequireToken,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewPasswordRequest>,
) -> Result<Json<ResultResponse>, TeaError> {
    if body.new.is_empty() {
        return Err(TeaError::BadRequest("new password is required".to_string()));
    }

    let stored = state.users.get_password_hash(&username).await?;
    verify_password(&body.old, &stored).inspect_err(|_| {
        warn!(%username, "incorrect password on change");
    })?;

    let hash = hash_password(&body.new)?;
    state.users.update_password(&username, &hash).await?;

    info!(%username, "changed password");
    Ok(Json(ResultResponse::success()))
}
