/// Requirement REST endpoints addressed by requirement id
///
/// Creation and listing are project-scoped and live under /api/projects.

use crate::api::extract::ApiJson;
use crate::api::AppState;
use crate::error::Result;
use crate::planning::{Requirement, RequirementUpdate};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/requirements/{id}",
        get(get_requirement)
            .put(update_requirement)
            .delete(delete_requirement),
    )
}

/// GET /api/requirements/{id}
async fn get_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Requirement>> {
    Ok(Json(state.store.get_requirement(&id).await?))
}

/// PUT /api/requirements/{id}
async fn update_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<RequirementUpdate>,
) -> Result<Json<Requirement>> {
    Ok(Json(state.store.update_requirement(&id, patch).await?))
}

/// DELETE /api/requirements/{id}
async fn delete_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    state.store.delete_requirement(&id).await?;
    Ok(Json(json!({ "message": "Requirement deleted successfully" })))
}
