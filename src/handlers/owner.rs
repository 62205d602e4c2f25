use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use super::{NameRequest, require_name};
use crate::db::{Owner, OwnerWithTeas};
use crate::error::TeaError;
use crate::middleware::{ApiJson, ApiPath, RequireToken};
use crate::router::AppState;

pub async fn list_owners(
    _auth: RequireToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<Owner>>, TeaError> {
    Ok(Json(state.owners.list_owners().await?))
}

pub async fn list_teas_by_owner(
    _auth: RequireToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<OwnerWithTeas>>, TeaError> {
    Ok(Json(state.owners.list_teas_by_owner().await?))
}

pub async fn get_owner(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Owner>, TeaError> {
    Ok(Json(state.owners.get_owner(id).await?))
}

pub async fn create_owner(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NameRequest>,
) -> Result<(StatusCode, Json<Owner>), TeaError> {
    let name = require_name(&body.name, "owner")?;
    let owner = state.owners.create_owner(&name).await?;
    info!(id = owner.id, name = %owner.name, "created owner");
    Ok((StatusCode::CREATED, Json(owner)))
}

pub async fn delete_owner(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Owner>, TeaError> {
    let owner = state.owners.delete_owner(id).await?;
    info!(id, name = %owner.name, "deleted owner");
    Ok(Json(owner))
}
