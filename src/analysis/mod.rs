/// Resource-allocation reasoning layer
///
/// Pure functions over planning records: interval overlap, utilization, gap and
/// over-allocation detection, candidate ranking, timeline layout and the dashboard
/// summary. Handlers fetch records from the store and hand them to these functions.

// Inclusive/exclusive date-range overlap
pub mod interval;

// Per-person utilization over a window
pub mod utilization;

// Unfilled requirement capacity
pub mod gaps;

// Pairwise conflicting allocations
pub mod over_allocation;

// Smart allocation candidate ordering
pub mod candidates;

// Columns, positions, row packing and project/person layouts
pub mod timeline;

// Organization-wide headline numbers
pub mod dashboard;

pub use candidates::{rank_candidates, Candidate, CandidateCategory};
pub use dashboard::{dashboard_summary, project_status, DashboardInput, DashboardSummary, ProjectStatus, ProjectWithStatus};
pub use gaps::{project_gaps, RequirementGap};
pub use interval::{DateRange, Dated};
pub use over_allocation::{over_allocated_people, OverAllocation};
pub use timeline::{
    layout_person_timeline, layout_project_timeline, Granularity, PersonTimeline, ProjectTimeline,
    TimelineConfig,
};
pub use utilization::{people_utilization, person_utilization, PersonUtilization};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::planning::{Allocation, LeavePeriod, LeaveStatus, Person, Project, Requirement, RoleType};
    use chrono::NaiveDate;

    const STAMP: &str = "2025-01-01 00:00:00";

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn role_type(id: &str, name: &str) -> RoleType {
        RoleType {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            created_at: STAMP.to_string(),
            updated_at: STAMP.to_string(),
        }
    }

    pub fn person(id: &str, name: &str, role_type_id: &str) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
            role_type_id: role_type_id.to_string(),
            role_type_name: None,
            created_at: STAMP.to_string(),
            updated_at: STAMP.to_string(),
        }
    }

    pub fn project(id: &str, name: &str, start: NaiveDate, end: NaiveDate) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            start_date: start,
            end_date: end,
            created_at: STAMP.to_string(),
            updated_at: STAMP.to_string(),
        }
    }

    pub fn requirement(id: &str, role_type_id: &str, count: i64, start: NaiveDate, end: NaiveDate) -> Requirement {
        Requirement {
            id: id.to_string(),
            project_id: "pr1".to_string(),
            role_type_id: role_type_id.to_string(),
            required_count: count,
            start_date: start,
            end_date: end,
            role_type_name: Some(role_type_id.to_string()),
            project_name: Some("Apollo".to_string()),
            created_at: STAMP.to_string(),
            updated_at: STAMP.to_string(),
        }
    }

    /// Unlinked allocation on project "pr1" for role "rt-dev"
    pub fn allocation(id: &str, person_id: &str, pct: i64, start: NaiveDate, end: NaiveDate) -> Allocation {
        Allocation {
            id: id.to_string(),
            project_id: "pr1".to_string(),
            person_id: person_id.to_string(),
            role_type_id: "rt-dev".to_string(),
            requirement_id: None,
            allocation_percentage: pct,
            start_date: start,
            end_date: end,
            person_name: Some(person_id.to_string()),
            project_name: Some("Apollo".to_string()),
            role_type_name: Some("Developer".to_string()),
            created_at: STAMP.to_string(),
            updated_at: STAMP.to_string(),
        }
    }

    pub fn linked(mut allocation: Allocation, requirement_id: &str) -> Allocation {
        allocation.requirement_id = Some(requirement_id.to_string());
        allocation
    }

    pub fn leave(id: &str, person_id: &str, start: NaiveDate, end: NaiveDate) -> LeavePeriod {
        LeavePeriod {
            id: id.to_string(),
            person_id: person_id.to_string(),
            start_date: start,
            end_date: end,
            leave_type: None,
            notes: None,
            status: LeaveStatus::Pending,
            person_name: Some(person_id.to_string()),
            role_type_name: None,
            created_at: STAMP.to_string(),
            updated_at: STAMP.to_string(),
        }
    }
}
