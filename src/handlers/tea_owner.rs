use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use super::{IdRef, ResultResponse};
use crate::db::{Owner, Tea, TeaWithOwners};
use crate::error::TeaError;
use crate::middleware::{ApiJson, ApiPath, RequireToken};
use crate::router::AppState;

/// GET /teas/owners
pub async fn list_teas_with_owners(
    _auth: RequireToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<TeaWithOwners>>, TeaError> {
    Ok(Json(state.tea_owners.list_teas_with_owners().await?))
}

/// GET /tea/{id}/owners
pub async fn list_owners_of_tea(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<Owner>>, TeaError> {
    Ok(Json(state.tea_owners.list_owners_of_tea(id).await?))
}

/// POST /tea/{id}/owner with `{"id": <ownerID>}`; responds with the tea.
pub async fn create_tea_owner(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiPath(tea_id): ApiPath<i64>,
    ApiJson(owner): ApiJson<IdRef>,
) -> Result<(StatusCode, Json<Tea>), TeaError> {
    let tea = state.tea_owners.create_tea_owner(tea_id, owner.id).await?;
    info!(tea_id, owner_id = owner.id, "created tea owner");
    Ok((StatusCode::CREATED, Json(tea)))
}

/// DELETE /tea/{teaID}/owner/{ownerID}
pub async fn delete_tea_owner(
    _auth: RequireToken,
    State(state): State<AppState>,
    ApiPath((tea_id, owner_id)): ApiPath<(i64, i64)>,
) -> Result<Json<ResultResponse>, TeaError> {
    state.tea_owners.delete_tea_owner(tea_id, owner_id).await?;
    info!(tea_id, owner_id, "deleted tea owner");
    Ok(Json(ResultResponse::success()))
}
