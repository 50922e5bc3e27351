/// Leave period REST endpoints

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::AppState;
use crate::error::Result;
use crate::planning::{LeavePeriod, LeaveStatus, LeaveStatusChange, LeaveUpdate, NewLeavePeriod};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/leave", get(list_leave).post(create_leave))
        .route(
            "/api/leave/{id}",
            get(get_leave).put(update_leave).delete(delete_leave),
        )
        .route("/api/leave/{id}/status", put(update_status))
}

#[derive(Debug, Deserialize)]
struct LeaveFilter {
    status: Option<LeaveStatus>,
}

/// GET /api/leave?status=pending
async fn list_leave(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<LeaveFilter>,
) -> Result<Json<Value>> {
    let leave = state.store.list_leave(filter.status).await?;
    Ok(Json(json!({ "leave": leave })))
}

/// GET /api/leave/{id}
async fn get_leave(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<LeavePeriod>> {
    Ok(Json(state.store.get_leave(&id).await?))
}

/// POST /api/leave
/// Body: { "person_id": "...", "start_date": "...", "end_date": "...", "leave_type"?, "notes"?, "status"? }
async fn create_leave(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewLeavePeriod>,
) -> Result<(StatusCode, Json<LeavePeriod>)> {
    let leave = state.store.create_leave(&payload).await?;
    Ok((StatusCode::CREATED, Json(leave)))
}

/// PUT /api/leave/{id}
async fn update_leave(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<LeaveUpdate>,
) -> Result<Json<LeavePeriod>> {
    Ok(Json(state.store.update_leave(&id, patch).await?))
}

/// PUT /api/leave/{id}/status
/// Body: { "status": "pending" | "approved" | "unapproved" }
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(change): ApiJson<LeaveStatusChange>,
) -> Result<Json<LeavePeriod>> {
    Ok(Json(state.store.update_leave_status(&id, change.status).await?))
}

/// DELETE /api/leave/{id}
async fn delete_leave(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    state.store.delete_leave(&id).await?;
    Ok(Json(json!({ "message": "Leave period deleted successfully" })))
}
