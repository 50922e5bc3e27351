/// Project REST endpoints
///
/// Project CRUD plus the project-scoped views: requirements, allocations, gap
/// detection and the requirement timeline.

use crate::analysis::{layout_project_timeline, project_gaps, ProjectTimeline, ProjectWithStatus};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::{today, AppState, WindowQuery};
use crate::error::Result;
use crate::planning::{NewProject, NewRequirement, Project, ProjectUpdate, Requirement};
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
        .route("/api/projects", get(list_projects).post(create_project))
        .route(
            "/api/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route(
            "/api/projects/{id}/requirements",
            get(list_requirements).post(create_requirement),
        )
        .route("/api/projects/{id}/allocations", get(list_allocations))
        .route("/api/projects/{id}/gaps", get(get_gaps))
        .route("/api/projects/{id}/timeline", get(get_timeline))
}

/// GET /api/projects
/// Returns: { "projects": [{ ...project, "status": "active", "status_label": "Active" }] }
async fn list_projects(State(state): State<AppState>) -> Result<Json<Value>> {
    let today = today();
    let projects: Vec<ProjectWithStatus> = state
        .store
        .list_projects()
        .await?
        .into_iter()
        .map(|p| ProjectWithStatus::new(p, today))
        .collect();
    Ok(Json(json!({ "projects": projects })))
}

/// GET /api/projects/{id}
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectWithStatus>> {
    let project = state.store.get_project(&id).await?;
    Ok(Json(ProjectWithStatus::new(project, today())))
}

/// POST /api/projects
/// Body: { "name": "...", "start_date": "YYYY-MM-DD", "end_date": "YYYY-MM-DD" }
async fn create_project(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewProject>,
) -> Result<(StatusCode, Json<Project>)> {
    let project = state.store.create_project(&payload).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/projects/{id}
async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProjectUpdate>,
) -> Result<Json<Project>> {
    Ok(Json(state.store.update_project(&id, patch).await?))
}

/// DELETE /api/projects/{id}
async fn delete_project(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    state.store.delete_project(&id).await?;
    Ok(Json(json!({ "message": "Project deleted successfully" })))
}

/// GET /api/projects/{id}/requirements
async fn list_requirements(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    state.store.get_project(&id).await?;
    let requirements = state.store.list_project_requirements(&id).await?;
    Ok(Json(json!({ "requirements": requirements })))
}

/// POST /api/projects/{id}/requirements
/// Body: { "role_type_id": "...", "required_count": 2, "start_date": "...", "end_date": "..." }
async fn create_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<NewRequirement>,
) -> Result<(StatusCode, Json<Requirement>)> {
    let requirement = state.store.create_requirement(&id, &payload).await?;
    Ok((StatusCode::CREATED, Json(requirement)))
}

/// GET /api/projects/{id}/allocations
async fn list_allocations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    state.store.get_project(&id).await?;
    let allocations = state.store.list_project_allocations(&id).await?;
    Ok(Json(json!({ "allocations": allocations })))
}

/// GET /api/projects/{id}/gaps
/// Returns: { "gaps": [{ "requirement_id": "...", "gap_count": 0.5, ... }] }
async fn get_gaps(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    state.store.get_project(&id).await?;
    let requirements = state.store.list_project_requirements(&id).await?;
    let allocations = state.store.list_project_allocations(&id).await?;

    let gaps = project_gaps(&requirements, &allocations);
    tracing::debug!(
        "🔍 Project {}: {} of {} requirements under-staffed",
        id,
        gaps.len(),
        requirements.len()
    );

    Ok(Json(json!({ "gaps": gaps })))
}

/// GET /api/projects/{id}/timeline?start=&end=&granularity=week|month
///
/// Without an explicit window the project's own dates are used.
async fn get_timeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(mut query): ApiQuery<WindowQuery>,
) -> Result<Json<ProjectTimeline>> {
    let project = state.store.get_project(&id).await?;
    query.start.get_or_insert(project.start_date);
    query.end.get_or_insert(project.end_date);
    let config = query.timeline_config(today())?;

    let requirements = state.store.list_project_requirements(&id).await?;
    let allocations = state.store.list_project_allocations(&id).await?;

    Ok(Json(layout_project_timeline(config, &requirements, &allocations)))
}
