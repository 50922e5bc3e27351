/// Planning domain layer
///
/// Record types for role types, people, projects, requirements, allocations and
/// leave periods, plus the input rules every write goes through.

// Record, insert and patch types
pub mod types;

// Field rules shared by creates and updates
pub mod validation;

pub use types::{
    Allocation, AllocationUpdate, LeavePeriod, LeaveStatus, LeaveStatusChange, LeaveUpdate,
    NewAllocation, NewLeavePeriod, NewPerson, NewProject, NewRequirement, NewRoleType, Person,
    PersonUpdate, Project, ProjectUpdate, Requirement, RequirementUpdate, RoleType,
    RoleTypeUpdate,
};
