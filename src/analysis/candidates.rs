/// Candidate ranking for new allocations
///
/// People are bucketed by availability and role fit, then ordered by how busy they
/// already are, so the least loaded person with the right role comes first.

use crate::analysis::utilization::{PersonUtilization, FULL_UTILIZATION};
use crate::planning::Person;
use serde::Serialize;
use std::collections::HashMap;

/// Ranking bucket, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateCategory {
    PerfectMatch,
    Available,
    BusySameRole,
    BusyDifferentRole,
}

impl CandidateCategory {
    fn classify(is_available: bool, matches_role: bool) -> Self {
        match (is_available, matches_role) {
            (true, true) => Self::PerfectMatch,
            (true, false) => Self::Available,
            (false, true) => Self::BusySameRole,
            (false, false) => Self::BusyDifferentRole,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PerfectMatch => "Perfect Match",
            Self::Available => "Available",
            Self::BusySameRole => "Busy - Same Role",
            Self::BusyDifferentRole => "Busy - Different Role",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub person: Person,
    pub current_utilization: i64,
    pub is_available: bool,
    pub matches_role: bool,
    pub category: CandidateCategory,
    pub label: &'static str,
}

/// Rank `people` for a slot needing `role_type_id`
///
/// People missing from `utilization` are treated as unallocated.
pub fn rank_candidates(
    people: &[Person],
    utilization: &[PersonUtilization],
    role_type_id: &str,
) -> Vec<Candidate> {
    let by_person: HashMap<&str, i64> = utilization
        .iter()
        .map(|u| (u.person_id.as_str(), u.utilization_percentage))
        .collect();

    let mut candidates: Vec<Candidate> = people
        .iter()
        .map(|person| {
            let current_utilization = by_person.get(person.id.as_str()).copied().unwrap_or(0);
            let is_available = current_utilization < FULL_UTILIZATION;
            let matches_role = person.role_type_id == role_type_id;
            let category = CandidateCategory::classify(is_available, matches_role);
            Candidate {
                person: person.clone(),
                current_utilization,
                is_available,
                matches_role,
                category,
                label: category.label(),
            }
        })
        .collect();

    candidates.sort_by_key(|c| (c.category, c.current_utilization));
    candidates
}
