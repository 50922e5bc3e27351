/// Role type REST endpoints
///
/// Deleting a role type still referenced by people or requirements answers 409.

use crate::api::extract::ApiJson;
use crate::api::AppState;
use crate::error::Result;
use crate::planning::{NewRoleType, RoleType, RoleTypeUpdate};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/role-types", get(list_role_types).post(create_role_type))
        .route(
            "/api/role-types/{id}",
            get(get_role_type).put(update_role_type).delete(delete_role_type),
        )
}

/// GET /api/role-types
async fn list_role_types(State(state): State<AppState>) -> Result<Json<Value>> {
    let role_types = state.store.list_role_types().await?;
    Ok(Json(json!({ "role_types": role_types })))
}

/// GET /api/role-types/{id}
async fn get_role_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoleType>> {
    Ok(Json(state.store.get_role_type(&id).await?))
}

/// POST /api/role-types
/// Body: { "name": "...", "description": "..." }
async fn create_role_type(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewRoleType>,
) -> Result<(StatusCode, Json<RoleType>)> {
    let role_type = state.store.create_role_type(&payload).await?;
    Ok((StatusCode::CREATED, Json(role_type)))
}

/// PUT /api/role-types/{id}
async fn update_role_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<RoleTypeUpdate>,
) -> Result<Json<RoleType>> {
    Ok(Json(state.store.update_role_type(&id, patch).await?))
}

/// DELETE /api/role-types/{id}
async fn delete_role_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    state.store.delete_role_type(&id).await?;
    Ok(Json(json!({ "message": "Role type deleted successfully" })))
}
