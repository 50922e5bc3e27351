/// Planning record definitions
///
/// Read models mirror the backend's tables and detailed views; the `New*` and `*Update`
/// types are the request bodies for inserts and partial updates.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Patch field that distinguishes "absent" (`None`) from an explicit `null`
/// (`Some(None)`), so nullable columns can be cleared
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A job category people are hired into and requirements ask for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoleType {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoleType {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleTypeUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl RoleTypeUpdate {
    pub fn apply_to(self, role_type: &mut RoleType) {
        if let Some(name) = self.name {
            role_type.name = name;
        }
        if let Some(description) = self.description {
            role_type.description = description;
        }
    }
}

/// An employee with exactly one role type (read through `people_with_roles`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role_type_id: String,
    pub role_type_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub role_type_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub role_type_id: Option<String>,
}

impl PersonUpdate {
    pub fn apply_to(self, person: &mut Person) {
        if let Some(name) = self.name {
            person.name = name;
        }
        if let Some(role_type_id) = self.role_type_id {
            person.role_type_id = role_type_id;
        }
    }
}

/// A time-bound engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProjectUpdate {
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(start_date) = self.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            project.end_date = end_date;
        }
    }
}

/// A need for `required_count` people of a role type within a date range
/// (read through `project_requirements_detailed`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Requirement {
    pub id: String,
    pub project_id: String,
    pub role_type_id: String,
    pub required_count: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub role_type_name: Option<String>,
    pub project_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Requirement body; the owning project comes from the route
#[derive(Debug, Clone, Deserialize)]
pub struct NewRequirement {
    pub role_type_id: String,
    pub required_count: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequirementUpdate {
    pub role_type_id: Option<String>,
    pub required_count: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RequirementUpdate {
    pub fn apply_to(self, requirement: &mut Requirement) {
        if let Some(role_type_id) = self.role_type_id {
            requirement.role_type_id = role_type_id;
        }
        if let Some(required_count) = self.required_count {
            requirement.required_count = required_count;
        }
        if let Some(start_date) = self.start_date {
            requirement.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            requirement.end_date = end_date;
        }
    }
}

/// Assignment of a person to a project at a percentage of their time
/// (read through `project_allocations_detailed`)
///
/// `requirement_id` is `None` for legacy allocations, which are matched to
/// requirements by role type and date overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Allocation {
    pub id: String,
    pub project_id: String,
    pub person_id: String,
    pub role_type_id: String,
    pub requirement_id: Option<String>,
    pub allocation_percentage: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub person_name: Option<String>,
    pub project_name: Option<String>,
    pub role_type_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn full_time() -> i64 {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAllocation {
    pub project_id: String,
    pub person_id: String,
    pub role_type_id: String,
    #[serde(default)]
    pub requirement_id: Option<String>,
    #[serde(default = "full_time")]
    pub allocation_percentage: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllocationUpdate {
    pub person_id: Option<String>,
    pub role_type_id: Option<String>,
    /// `null` unlinks the allocation, turning it into a legacy allocation
    #[serde(default, deserialize_with = "nullable")]
    pub requirement_id: Option<Option<String>>,
    pub allocation_percentage: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AllocationUpdate {
    pub fn apply_to(self, allocation: &mut Allocation) {
        if let Some(person_id) = self.person_id {
            allocation.person_id = person_id;
        }
        if let Some(role_type_id) = self.role_type_id {
            allocation.role_type_id = role_type_id;
        }
        if let Some(requirement_id) = self.requirement_id {
            allocation.requirement_id = requirement_id;
        }
        if let Some(percentage) = self.allocation_percentage {
            allocation.allocation_percentage = percentage;
        }
        if let Some(start_date) = self.start_date {
            allocation.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            allocation.end_date = end_date;
        }
    }
}

/// Approval state of a leave period, stored as lowercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Unapproved,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Unapproved => "unapproved",
        }
    }
}

/// A person's time off, joined with the person's name and role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeavePeriod {
    pub id: String,
    pub person_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: Option<String>,
    pub notes: Option<String>,
    pub status: LeaveStatus,
    pub person_name: Option<String>,
    pub role_type_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLeavePeriod {
    pub person_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub leave_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: LeaveStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaveUpdate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "nullable")]
    pub leave_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    pub status: Option<LeaveStatus>,
}

impl LeaveUpdate {
    pub fn apply_to(self, leave: &mut LeavePeriod) {
        if let Some(start_date) = self.start_date {
            leave.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            leave.end_date = end_date;
        }
        if let Some(leave_type) = self.leave_type {
            leave.leave_type = leave_type;
        }
        if let Some(notes) = self.notes {
            leave.notes = notes;
        }
        if let Some(status) = self.status {
            leave.status = status;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaveStatusChange {
    pub status: LeaveStatus,
}
