use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use workforce_planner::{build_router, WorkforceStore};

async fn app() -> Router {
    let store = WorkforceStore::in_memory().await.unwrap();
    build_router(store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> Value {
    let (status, value) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri}: {value}");
    value
}

fn id(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

/// Role "Developer", two developers and one designer, one project over H1 2025
struct World {
    app: Router,
    dev_role: String,
    design_role: String,
    ada: String,
    linus: String,
    grace: String,
    project: String,
}

async fn world() -> World {
    let app = app().await;
    let dev_role = id(&post(&app, "/api/role-types", json!({ "name": "Developer" })).await);
    let design_role = id(&post(&app, "/api/role-types", json!({ "name": "Designer" })).await);
    let ada = id(&post(&app, "/api/people", json!({ "name": "Ada", "role_type_id": dev_role })).await);
    let linus = id(&post(&app, "/api/people", json!({ "name": "Linus", "role_type_id": dev_role })).await);
    let grace = id(&post(&app, "/api/people", json!({ "name": "Grace", "role_type_id": design_role })).await);
    let project = id(&post(
        &app,
        "/api/projects",
        json!({ "name": "Apollo", "start_date": "2025-01-01", "end_date": "2025-06-30" }),
    )
    .await);

    World {
        app,
        dev_role,
        design_role,
        ada,
        linus,
        grace,
        project,
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn test_role_type_crud() {
    let app = app().await;
    let created = post(&app, "/api/role-types", json!({ "name": "QA", "description": "Testing" })).await;
    let role_id = id(&created);

    let (status, listed) = send(&app, Method::GET, "/api/role-types", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["role_types"].as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/role-types/{role_id}"),
        Some(json!({ "name": "Quality" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Quality");
    assert_eq!(updated["description"], "Testing");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/role-types/{role_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, &format!("/api/role-types/{role_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_validation_errors_are_bad_requests() {
    let w = world().await;

    let (status, body) = send(&w.app, Method::POST, "/api/role-types", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &w.app,
        Method::POST,
        "/api/projects",
        Some(json!({ "name": "Backwards", "start_date": "2025-06-01", "end_date": "2025-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "End date must be after start date");

    let (status, _) = send(
        &w.app,
        Method::POST,
        "/api/allocations",
        Some(json!({
            "project_id": w.project,
            "person_id": w.ada,
            "role_type_id": w.dev_role,
            "allocation_percentage": 150,
            "start_date": "2025-01-01",
            "end_date": "2025-01-31",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_in_use_deletes_conflict() {
    let w = world().await;
    post(
        &w.app,
        "/api/allocations",
        json!({
            "project_id": w.project,
            "person_id": w.ada,
            "role_type_id": w.dev_role,
            "start_date": "2025-01-01",
            "end_date": "2025-01-31",
        }),
    )
    .await;

    for uri in [
        format!("/api/role-types/{}", w.dev_role),
        format!("/api/people/{}", w.ada),
        format!("/api/projects/{}", w.project),
    ] {
        let (status, body) = send(&w.app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT, "DELETE {uri}");
        assert!(body["error"].as_str().unwrap().starts_with("Cannot delete"));
    }

    // Unreferenced records go fine
    let (status, _) = send(&w.app, Method::DELETE, &format!("/api/people/{}", w.linus), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_project_status_and_gaps() {
    let w = world().await;
    let (status, project) = send(&w.app, Method::GET, &format!("/api/projects/{}", w.project), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["name"], "Apollo");
    assert!(project["status"].is_string());

    let requirement = post(
        &w.app,
        &format!("/api/projects/{}/requirements", w.project),
        json!({
            "role_type_id": w.dev_role,
            "required_count": 2,
            "start_date": "2025-01-01",
            "end_date": "2025-03-31",
        }),
    )
    .await;
    let requirement_id = id(&requirement);
    assert_eq!(requirement["role_type_name"], "Developer");

    // One full-time direct allocation and one half-time legacy allocation
    post(
        &w.app,
        "/api/allocations",
        json!({
            "project_id": w.project,
            "person_id": w.ada,
            "role_type_id": w.dev_role,
            "requirement_id": requirement_id,
            "start_date": "2025-01-01",
            "end_date": "2025-03-31",
        }),
    )
    .await;
    post(
        &w.app,
        "/api/allocations",
        json!({
            "project_id": w.project,
            "person_id": w.linus,
            "role_type_id": w.dev_role,
            "allocation_percentage": 50,
            "start_date": "2025-02-01",
            "end_date": "2025-02-28",
        }),
    )
    .await;

    let (status, body) = send(&w.app, Method::GET, &format!("/api/projects/{}/gaps", w.project), None).await;
    assert_eq!(status, StatusCode::OK);
    let gaps = body["gaps"].as_array().unwrap();
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0]["requirement_id"], requirement_id.as_str());
    assert_eq!(gaps[0]["allocated_count"], 1.5);
    assert_eq!(gaps[0]["gap_count"], 0.5);

    let (_, body) = send(&w.app, Method::GET, &format!("/api/projects/{}/allocations", w.project), None).await;
    assert_eq!(body["allocations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_gaps_for_missing_project_is_not_found() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/api/projects/ghost/gaps", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_over_allocation_and_utilization() {
    let w = world().await;
    let second = id(&post(
        &w.app,
        "/api/projects",
        json!({ "name": "Gemini", "start_date": "2025-01-01", "end_date": "2025-12-31" }),
    )
    .await);

    for (project, pct) in [(&w.project, 60), (&second, 60)] {
        post(
            &w.app,
            "/api/allocations",
            json!({
                "project_id": project,
                "person_id": w.ada,
                "role_type_id": w.dev_role,
                "allocation_percentage": pct,
                "start_date": "2025-03-01",
                "end_date": "2025-03-31",
            }),
        )
        .await;
    }

    let (status, body) = send(&w.app, Method::GET, "/api/analytics/over-allocated", None).await;
    assert_eq!(status, StatusCode::OK);
    let conflicts = body["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["person_id"], w.ada.as_str());
    assert_eq!(conflicts[0]["total_allocation"], 120);

    let (status, body) = send(
        &w.app,
        Method::GET,
        &format!("/api/people/{}/utilization?start=2025-03-01&end=2025-03-31", w.ada),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["utilization_percentage"], 100);
    assert_eq!(body["allocated_percentage"], 120);

    let (status, body) = send(
        &w.app,
        Method::GET,
        "/api/analytics/utilization?start=2025-03-01&end=2025-03-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["people"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_inverted_window_is_rejected() {
    let w = world().await;
    let (status, _) = send(
        &w.app,
        Method::GET,
        "/api/analytics/utilization?start=2025-04-01&end=2025-03-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_candidates_are_ranked() {
    let w = world().await;
    post(
        &w.app,
        "/api/allocations",
        json!({
            "project_id": w.project,
            "person_id": w.linus,
            "role_type_id": w.dev_role,
            "allocation_percentage": 100,
            "start_date": "2025-04-01",
            "end_date": "2025-04-30",
        }),
    )
    .await;

    let (status, body) = send(
        &w.app,
        Method::GET,
        &format!(
            "/api/allocations/candidates?role_type_id={}&start=2025-04-01&end=2025-04-30",
            w.dev_role
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let candidates = body["candidates"].as_array().unwrap();
    let order: Vec<&str> = candidates
        .iter()
        .map(|c| c["person"]["id"].as_str().unwrap())
        .collect();
    // free developer, free designer, then the busy developer
    assert_eq!(order, vec![w.ada.as_str(), w.grace.as_str(), w.linus.as_str()]);
    assert_eq!(candidates[0]["category"], "perfect_match");
    assert_eq!(candidates[2]["is_available"], false);
}

#[tokio::test]
async fn test_leave_workflow() {
    let w = world().await;
    let leave = post(
        &w.app,
        "/api/leave",
        json!({
            "person_id": w.grace,
            "start_date": "2025-05-05",
            "end_date": "2025-05-09",
            "leave_type": "vacation",
        }),
    )
    .await;
    assert_eq!(leave["status"], "pending");
    let leave_id = id(&leave);

    let (_, body) = send(&w.app, Method::GET, "/api/leave?status=pending", None).await;
    assert_eq!(body["leave"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &w.app,
        Method::PUT,
        &format!("/api/leave/{leave_id}/status"),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let (_, body) = send(&w.app, Method::GET, "/api/leave?status=pending", None).await;
    assert!(body["leave"].as_array().unwrap().is_empty());

    let (_, body) = send(&w.app, Method::GET, &format!("/api/people/{}/leave", w.grace), None).await;
    assert_eq!(body["leave"].as_array().unwrap().len(), 1);

    let (status, _) = send(&w.app, Method::DELETE, &format!("/api/leave/{leave_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&w.app, Method::GET, &format!("/api/leave/{leave_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_timeline_layout() {
    let w = world().await;
    let requirement_id = id(&post(
        &w.app,
        &format!("/api/projects/{}/requirements", w.project),
        json!({
            "role_type_id": w.design_role,
            "required_count": 2,
            "start_date": "2025-02-01",
            "end_date": "2025-03-31",
        }),
    )
    .await);
    post(
        &w.app,
        "/api/allocations",
        json!({
            "project_id": w.project,
            "person_id": w.grace,
            "role_type_id": w.design_role,
            "requirement_id": requirement_id,
            "start_date": "2025-02-01",
            "end_date": "2025-02-28",
        }),
    )
    .await;

    let (status, body) = send(
        &w.app,
        Method::GET,
        &format!("/api/projects/{}/timeline?granularity=month", w.project),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"]["start_date"], "2025-01-01");
    assert_eq!(body["columns"].as_array().unwrap().len(), 6);

    let blocks = body["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    let slots = blocks[0]["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["allocation"]["person_id"], w.grace.as_str());
    assert!(slots[1]["allocation"].is_null());
    // two slots: max(60, 2 * 30 + 20)
    assert_eq!(blocks[0]["height"], 80.0);
}

#[tokio::test]
async fn test_person_timeline_rows() {
    let w = world().await;
    post(
        &w.app,
        "/api/allocations",
        json!({
            "project_id": w.project,
            "person_id": w.ada,
            "role_type_id": w.dev_role,
            "allocation_percentage": 50,
            "start_date": "2025-01-06",
            "end_date": "2025-01-31",
        }),
    )
    .await;
    post(
        &w.app,
        "/api/leave",
        json!({ "person_id": w.ada, "start_date": "2025-01-13", "end_date": "2025-01-17" }),
    )
    .await;

    let (status, body) = send(
        &w.app,
        Method::GET,
        &format!("/api/people/{}/timeline?start=2025-01-01&end=2025-02-28", w.ada),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // leave overlaps the allocation, so it lands on its own row
    assert_eq!(body["rows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let w = world().await;
    let (status, body) = send(&w.app, Method::GET, "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_people"], 3);
    assert_eq!(body["role_types"], 2);
    assert_eq!(body["over_allocation_conflicts"], 0);
    assert_eq!(body["recent_projects"].as_array().unwrap().len(), 1);

    let team = body["team_overview"].as_array().unwrap();
    let developers = team.iter().find(|r| r["role_type_name"] == "Developer").unwrap();
    assert_eq!(developers["people"], 2);
}

#[tokio::test]
async fn test_timeline_at_end_of_calendar() {
    let w = world().await;
    let (status, body) = send(
        &w.app,
        Method::GET,
        &format!("/api/people/{}/timeline?start=%2B262142-12-20&end=%2B262142-12-31", w.ada),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(!body["columns"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_overlong_window_is_rejected() {
    let w = world().await;
    let (status, body) = send(
        &w.app,
        Method::GET,
        &format!(
            "/api/people/{}/timeline?start=0001-01-01&end=9999-12-31&granularity=week",
            w.ada
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date window must not exceed 10 years");
}

#[tokio::test]
async fn test_oversized_requirement_is_rejected() {
    let w = world().await;
    let (status, body) = send(
        &w.app,
        Method::POST,
        &format!("/api/projects/{}/requirements", w.project),
        Some(json!({
            "role_type_id": w.dev_role,
            "required_count": i64::MAX,
            "start_date": "2025-01-01",
            "end_date": "2025-03-31",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Required count must be at most"));
}

#[tokio::test]
async fn test_allocation_unlinked_with_null() {
    let w = world().await;
    let requirement_id = id(&post(
        &w.app,
        &format!("/api/projects/{}/requirements", w.project),
        json!({
            "role_type_id": w.dev_role,
            "required_count": 1,
            "start_date": "2025-01-01",
            "end_date": "2025-03-31",
        }),
    )
    .await);
    let allocation_id = id(&post(
        &w.app,
        "/api/allocations",
        json!({
            "project_id": w.project,
            "person_id": w.ada,
            "role_type_id": w.dev_role,
            "requirement_id": requirement_id,
            "start_date": "2025-01-01",
            "end_date": "2025-03-31",
        }),
    )
    .await);

    let (status, body) = send(
        &w.app,
        Method::PUT,
        &format!("/api/allocations/{allocation_id}"),
        Some(json!({ "requirement_id": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["requirement_id"].is_null());
}

#[tokio::test]
async fn test_role_type_held_by_allocation_conflicts() {
    let w = world().await;
    let qa = id(&post(&w.app, "/api/role-types", json!({ "name": "QA" })).await);
    post(
        &w.app,
        "/api/allocations",
        json!({
            "project_id": w.project,
            "person_id": w.ada,
            "role_type_id": qa,
            "start_date": "2025-01-01",
            "end_date": "2025-01-31",
        }),
    )
    .await;

    let (status, body) = send(&w.app, Method::DELETE, &format!("/api/role-types/{qa}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Cannot delete role type that is currently in use");
}

#[tokio::test]
async fn test_malformed_input_uses_error_body() {
    let w = world().await;
    let (status, body) = send(
        &w.app,
        Method::POST,
        "/api/projects",
        Some(json!({ "name": "Broken", "start_date": "not-a-date", "end_date": "2025-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&w.app, Method::GET, "/api/leave?status=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
