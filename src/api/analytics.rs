/// Organization-wide analytics endpoints
///
/// Over-allocation conflicts, per-person utilization and the dashboard summary.
/// Each request loads the records it needs and runs the analysis in memory.

use crate::analysis::{dashboard_summary, over_allocated_people, people_utilization, DashboardInput, DashboardSummary};
use crate::api::extract::ApiQuery;
use crate::api::{today, AppState, WindowQuery};
use crate::error::Result;
use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/analytics/over-allocated", get(over_allocated))
        .route("/api/analytics/utilization", get(utilization))
        .route("/api/dashboard", get(dashboard))
}

/// GET /api/analytics/over-allocated
/// Returns: { "conflicts": [{ "person_id", "person_name", "total_allocation", "conflicting_allocations": [a, b] }] }
async fn over_allocated(State(state): State<AppState>) -> Result<Json<Value>> {
    let allocations = state.store.list_allocations().await?;
    let conflicts = over_allocated_people(&allocations);
    Ok(Json(json!({ "conflicts": conflicts })))
}

/// GET /api/analytics/utilization?start=&end=
async fn utilization(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<WindowQuery>,
) -> Result<Json<Value>> {
    let window = query.window(today())?;
    let people = state.store.list_people().await?;
    let allocations = state.store.list_allocations().await?;

    let utilization = people_utilization(&people, &allocations, window);
    Ok(Json(json!({
        "start": window.start,
        "end": window.end,
        "people": utilization,
    })))
}

/// GET /api/dashboard
async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardSummary>> {
    let role_types = state.store.list_role_types().await?;
    let people = state.store.list_people().await?;
    let projects = state.store.list_projects().await?;
    let allocations = state.store.list_allocations().await?;
    let leave = state.store.list_leave(None).await?;

    let input = DashboardInput {
        role_types: &role_types,
        people: &people,
        projects: &projects,
        allocations: &allocations,
        leave: &leave,
    };
    Ok(Json(dashboard_summary(&input, today())))
}
