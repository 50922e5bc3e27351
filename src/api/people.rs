/// People REST endpoints
///
/// Besides CRUD, exposes a person's allocations, leave, utilization over a window
/// and their timeline layout.

use crate::analysis::{layout_person_timeline, person_utilization, utilization, PersonTimeline};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::{today, AppState, WindowQuery};
use crate::error::Result;
use crate::planning::{NewPerson, Person, PersonUpdate};
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
        .route("/api/people", get(list_people).post(create_person))
        .route(
            "/api/people/{id}",
            get(get_person).put(update_person).delete(delete_person),
        )
        .route("/api/people/{id}/allocations", get(person_allocations))
        .route("/api/people/{id}/leave", get(person_leave))
        .route("/api/people/{id}/utilization", get(get_person_utilization))
        .route("/api/people/{id}/timeline", get(person_timeline))
}

/// GET /api/people
async fn list_people(State(state): State<AppState>) -> Result<Json<Value>> {
    let people = state.store.list_people().await?;
    Ok(Json(json!({ "people": people })))
}

/// GET /api/people/{id}
async fn get_person(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Person>> {
    Ok(Json(state.store.get_person(&id).await?))
}

/// POST /api/people
/// Body: { "name": "...", "role_type_id": "..." }
async fn create_person(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewPerson>,
) -> Result<(StatusCode, Json<Person>)> {
    let person = state.store.create_person(&payload).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

/// PUT /api/people/{id}
async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<PersonUpdate>,
) -> Result<Json<Person>> {
    Ok(Json(state.store.update_person(&id, patch).await?))
}

/// DELETE /api/people/{id}
async fn delete_person(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    state.store.delete_person(&id).await?;
    Ok(Json(json!({ "message": "Person deleted successfully" })))
}

/// GET /api/people/{id}/allocations
async fn person_allocations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    state.store.get_person(&id).await?;
    let allocations = state.store.list_person_allocations(&id).await?;
    Ok(Json(json!({ "allocations": allocations })))
}

/// GET /api/people/{id}/leave
async fn person_leave(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    state.store.get_person(&id).await?;
    let leave = state.store.list_person_leave(&id).await?;
    Ok(Json(json!({ "leave": leave })))
}

/// GET /api/people/{id}/utilization?start=YYYY-MM-DD&end=YYYY-MM-DD
/// Returns: { "person_id": "...", "start": "...", "end": "...", "utilization_percentage": 0..=100 }
async fn get_person_utilization(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<WindowQuery>,
) -> Result<Json<Value>> {
    let window = query.window(today())?;
    state.store.get_person(&id).await?;

    let allocations = state.store.list_person_allocations_in(&id, window).await?;
    let utilization_percentage = person_utilization(&id, &allocations, window);
    let allocated = utilization::allocated_percentage(&id, &allocations, window);

    tracing::debug!(
        "📊 Utilization for {} over {}..{}: {}% ({}% allocated)",
        id,
        window.start,
        window.end,
        utilization_percentage,
        allocated
    );

    Ok(Json(json!({
        "person_id": id,
        "start": window.start,
        "end": window.end,
        "utilization_percentage": utilization_percentage,
        "allocated_percentage": allocated,
    })))
}

/// GET /api/people/{id}/timeline?start=&end=&granularity=week|month
async fn person_timeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<WindowQuery>,
) -> Result<Json<PersonTimeline>> {
    let config = query.timeline_config(today())?;
    state.store.get_person(&id).await?;

    let allocations = state.store.list_person_allocations(&id).await?;
    let leave = state.store.list_person_leave(&id).await?;

    Ok(Json(layout_person_timeline(config, &allocations, &leave)))
}
