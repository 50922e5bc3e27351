/// Allocation REST endpoints
///
/// Allocation CRUD and the smart-allocation candidate list, which ranks everyone by
/// availability and role fit over the slot's dates.

use crate::analysis::{people_utilization, rank_candidates, Candidate};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::{today, AppState, WindowQuery};
use crate::error::Result;
use crate::planning::{Allocation, AllocationUpdate, NewAllocation};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/allocations", get(list_allocations).post(create_allocation))
        .route("/api/allocations/candidates", get(list_candidates))
        .route(
            "/api/allocations/{id}",
            get(get_allocation)
                .put(update_allocation)
                .delete(delete_allocation),
        )
}

#[derive(Debug, Deserialize)]
struct CandidateQuery {
    role_type_id: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// GET /api/allocations
async fn list_allocations(State(state): State<AppState>) -> Result<Json<Value>> {
    let allocations = state.store.list_allocations().await?;
    Ok(Json(json!({ "allocations": allocations })))
}

/// GET /api/allocations/{id}
async fn get_allocation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Allocation>> {
    Ok(Json(state.store.get_allocation(&id).await?))
}

/// POST /api/allocations
/// Body: { "project_id", "person_id", "role_type_id", "requirement_id"?, "allocation_percentage"?, "start_date", "end_date" }
async fn create_allocation(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewAllocation>,
) -> Result<(StatusCode, Json<Allocation>)> {
    let allocation = state.store.create_allocation(&payload).await?;
    Ok((StatusCode::CREATED, Json(allocation)))
}

/// PUT /api/allocations/{id}
async fn update_allocation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<AllocationUpdate>,
) -> Result<Json<Allocation>> {
    Ok(Json(state.store.update_allocation(&id, patch).await?))
}

/// DELETE /api/allocations/{id}
async fn delete_allocation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    state.store.delete_allocation(&id).await?;
    Ok(Json(json!({ "message": "Allocation deleted successfully" })))
}

/// GET /api/allocations/candidates?role_type_id=...&start=...&end=...
/// Returns: { "candidates": [{ "person": {...}, "current_utilization": 40, "category": "perfect_match", ... }] }
async fn list_candidates(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CandidateQuery>,
) -> Result<Json<Value>> {
    let window = WindowQuery {
        start: query.start,
        end: query.end,
        granularity: None,
    }
    .window(today())?;

    let people = state.store.list_people().await?;
    let allocations = state.store.list_allocations().await?;
    let utilization = people_utilization(&people, &allocations, window);

    let candidates: Vec<Candidate> = rank_candidates(&people, &utilization, &query.role_type_id);
    tracing::debug!(
        "🧭 Ranked {} candidates for role {} over {}..{}",
        candidates.len(),
        query.role_type_id,
        window.start,
        window.end
    );

    Ok(Json(json!({ "candidates": candidates })))
}
