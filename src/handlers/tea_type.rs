use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use super::{NameRequest, require_name};
use crate::db::{TeaType, TypeWithTeas};
use crate::error::TeaError;
use crate::middleware::{ApiJson, ApiPath, RequireToken};
use crate::router::AppState;

/// GET /types
pub async fn list_tea_types(
    _auth: RequireToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<TeaType>>, TeaError> {
    let types = state.tea_types.list_tea_types().await?;
    info!(count = types.len(), "listed tea types");
    Ok(Json(types))
}

/// GET /types/teas
pub async fn list_teas_by_type(
    _auth: RequireToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<TypeWithTeas>>, TeaError> {
    Ok(Json(state.tea_types.list_teas_by_type().await?))
}

/// GET /type/{id}
pub async fn get_tea_type(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TeaType>, TeaError> {
    Ok(Json(state.tea_types.get_tea_type(id).await?))
}

/// POST /type
pub async fn create_tea_type(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NameRequest>,
) -> Result<(StatusCode, Json<TeaType>), TeaError> {
    let name = require_name(&body.name, "tea type")?;
    let tea_type = state.tea_types.create_tea_type(&name).await?;
    info!(id = tea_type.id, name = %tea_type.name, "created tea type");
    Ok((StatusCode::CREATED, Json(tea_type)))
}

/// DELETE /type/{id}
pub async fn delete_tea_type(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TeaType>, TeaError> {
    let tea_type = state.tea_types.delete_tea_type(id).await?;
    info!(id, name = %tea_type.name, "deleted tea type");
    Ok(Json(tea_type))
}
