/// Dashboard summary
///
/// Headline counts for the organization: active projects, headcount per role,
/// current utilization and outstanding conflicts.

use crate::analysis::interval::Dated;
use crate::analysis::over_allocation::over_allocated_people;
use crate::analysis::timeline::month_window;
use crate::analysis::utilization::{overall_utilization, people_utilization};
use crate::planning::{Allocation, LeavePeriod, LeaveStatus, Person, Project, RoleType};
use chrono::NaiveDate;
use serde::Serialize;

/// Number of projects listed under "recent projects"
pub const RECENT_PROJECT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    NotStarted,
    Active,
    Completed,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

pub fn project_status(project: &Project, today: NaiveDate) -> ProjectStatus {
    if today < project.start_date {
        ProjectStatus::NotStarted
    } else if today > project.end_date {
        ProjectStatus::Completed
    } else {
        ProjectStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithStatus {
    #[serde(flatten)]
    pub project: Project,
    pub status: ProjectStatus,
    pub status_label: &'static str,
}

impl ProjectWithStatus {
    pub fn new(project: Project, today: NaiveDate) -> Self {
        let status = project_status(&project, today);
        Self {
            project,
            status,
            status_label: status.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleHeadcount {
    pub role_type_id: String,
    pub role_type_name: String,
    pub people: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub active_projects: usize,
    pub total_people: usize,
    pub role_types: usize,
    /// Mean utilization over the current month, in percent
    pub utilization: f64,
    pub over_allocation_conflicts: usize,
    pub pending_leave: usize,
    pub recent_projects: Vec<ProjectWithStatus>,
    pub team_overview: Vec<RoleHeadcount>,
}

/// Records the dashboard is computed from
pub struct DashboardInput<'a> {
    pub role_types: &'a [RoleType],
    pub people: &'a [Person],
    pub projects: &'a [Project],
    pub allocations: &'a [Allocation],
    pub leave: &'a [LeavePeriod],
}

pub fn dashboard_summary(input: &DashboardInput<'_>, today: NaiveDate) -> DashboardSummary {
    let active_projects = input
        .projects
        .iter()
        .filter(|p| p.date_range().contains(today))
        .count();

    let utilization = people_utilization(input.people, input.allocations, month_window(today));

    let team_overview = input
        .role_types
        .iter()
        .map(|rt| RoleHeadcount {
            role_type_id: rt.id.clone(),
            role_type_name: rt.name.clone(),
            people: input
                .people
                .iter()
                .filter(|p| p.role_type_id == rt.id)
                .count(),
        })
        .collect();

    DashboardSummary {
        active_projects,
        total_people: input.people.len(),
        role_types: input.role_types.len(),
        utilization: overall_utilization(&utilization),
        over_allocation_conflicts: over_allocated_people(input.allocations).len(),
        pending_leave: input
            .leave
            .iter()
            .filter(|l| l.status == LeaveStatus::Pending)
            .count(),
        recent_projects: input
            .projects
            .iter()
            .take(RECENT_PROJECT_LIMIT)
            .cloned()
            .map(|p| ProjectWithStatus::new(p, today))
            .collect(),
        team_overview,
    }
}
