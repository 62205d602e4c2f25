use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::info;

use super::{IdRef, require_name};
use crate::db::Tea;
use crate::error::TeaError;
use crate::middleware::{ApiJson, ApiPath, RequireToken};
use crate::router::AppState;

/// Body of `POST /tea`: `{"name": "Snowball", "type": {"id": 1}}`.
#[derive(Debug, Deserialize)]
pub struct CreateTeaRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub tea_type: IdRef,
}

pub async fn list_teas(
    _auth: RequireToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<Tea>>, TeaError> {
    Ok(Json(state.teas.list_teas().await?))
}

pub async fn get_tea(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Tea>, TeaError> {
    Ok(Json(state.teas.get_tea(id).await?))
}

pub async fn create_tea(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateTeaRequest>,
) -> Result<(StatusCode, Json<Tea>), TeaError> {
    let name = require_name(&body.name, "tea")?;
    let tea = state.teas.create_tea(&name, body.tea_type.id).await?;
    info!(id = tea.id, name = %tea.name, tea_type = %tea.tea_type.name, "created tea");
    Ok((StatusCode::CREATED, Json(tea)))
}

pub async fn delete_tea(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Tea>, TeaError> {
    let tea = state.teas.delete_tea(id).await?;
    info!(id, name = %tea.name, "deleted tea");
    Ok(Json(tea))
}
