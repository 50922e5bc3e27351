/// Workforce planner: resource allocation reasoning over people, projects and time
///
/// Tracks role types, people, projects, staffing requirements, allocations and leave,
/// and answers the planning questions on top of them: where are the staffing gaps,
/// who is over-allocated, who is free for this slot, and how does it all lay out on a
/// timeline.

// Core configuration and setup
pub mod config;

// Error type shared by the store and the HTTP layer
pub mod error;

// Planning records, inputs and validation rules
pub mod planning;

// SQLite persistence for planning records
pub mod store;

// Pure analysis: intervals, utilization, gaps, over-allocation, candidates, timelines, dashboard
pub mod analysis;

// HTTP API layer - REST endpoints over the store and analysis
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use error::{PlanningError, Result};
pub use planning::{Allocation, LeavePeriod, LeaveStatus, Person, Project, Requirement, RoleType};
pub use server::{build_router, start_server};
pub use store::WorkforceStore;
