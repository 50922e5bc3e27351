/// HTTP API Layer
///
/// REST endpoints over the planning store and analysis functions:
/// - CRUD for role types, people, projects, requirements, allocations and leave
/// - Gap, utilization, over-allocation and candidate analysis
/// - Timeline layouts for projects and people
/// - Dashboard summary

use crate::analysis::timeline::{default_range, Granularity, TimelineConfig};
use crate::analysis::interval::days_between;
use crate::analysis::DateRange;
use crate::error::{PlanningError, Result};
use crate::store::WorkforceStore;
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;

// JSON and query extractors with `{"error": ..}` rejections
pub mod extract;

// Role type endpoints
pub mod role_types;

// People endpoints, including per-person allocations, leave, utilization and timeline
pub mod people;

// Project endpoints, including requirements, gaps and project timeline
pub mod projects;

// Requirement endpoints addressed by requirement id
pub mod requirements;

// Allocation endpoints and smart allocation candidates
pub mod allocations;

// Leave period endpoints
pub mod leave;

// Organization-wide analytics and dashboard
pub mod analytics;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// SQLite-backed planning store
    pub store: WorkforceStore,
}

/// Create all API routes
pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .merge(role_types::routes())
        .merge(people::routes())
        .merge(projects::routes())
        .merge(requirements::routes())
        .merge(allocations::routes())
        .merge(leave::routes())
        .merge(analytics::routes())
}

/// Today's date in the server's local time zone
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Longest window a request may ask for, roughly ten years
pub const MAX_WINDOW_DAYS: i64 = 3660;

/// Optional `?start=&end=&granularity=` query shared by windowed endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub granularity: Option<Granularity>,
}

impl WindowQuery {
    /// Requested window, with missing bounds taken from the default timeline range
    pub fn window(&self, today: NaiveDate) -> Result<DateRange> {
        let fallback = default_range(today);
        let window = DateRange::new(
            self.start.unwrap_or(fallback.start),
            self.end.unwrap_or(fallback.end),
        );
        if window.end < window.start {
            return Err(PlanningError::validation(
                "End date must be on or after start date",
            ));
        }
        if days_between(window.start, window.end) > MAX_WINDOW_DAYS {
            return Err(PlanningError::validation(
                "Date window must not exceed 10 years",
            ));
        }
        Ok(window)
    }

    pub fn timeline_config(&self, today: NaiveDate) -> Result<TimelineConfig> {
        let window = self.window(today)?;
        Ok(TimelineConfig::new(
            window.start,
            window.end,
            self.granularity.unwrap_or_default(),
        ))
    }
}
