/// Utilization computation
///
/// A person's utilization over a window is the sum of the percentages of their
/// allocations that touch the window, capped at 100.

use crate::analysis::interval::{DateRange, Dated};
use crate::planning::{Allocation, Person};
use serde::Serialize;

/// Upper bound reported for any single person
pub const FULL_UTILIZATION: i64 = 100;

/// Utilization of one person over a window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonUtilization {
    pub person_id: String,
    pub person_name: String,
    pub utilization_percentage: i64,
}

/// Uncapped sum of `person_id`'s allocation percentages overlapping `window`
pub fn allocated_percentage(person_id: &str, allocations: &[Allocation], window: DateRange) -> i64 {
    allocations
        .iter()
        .filter(|a| a.person_id == person_id)
        .filter(|a| a.date_range().overlaps_inclusive(&window))
        .map(|a| a.allocation_percentage)
        .sum()
}

/// Utilization of `person_id` over `window`, capped at [`FULL_UTILIZATION`]
///
/// Allocations belonging to other people are ignored, so the full allocation list
/// can be passed straight through.
pub fn person_utilization(person_id: &str, allocations: &[Allocation], window: DateRange) -> i64 {
    allocated_percentage(person_id, allocations, window).min(FULL_UTILIZATION)
}

/// Utilization for every person, in input order
pub fn people_utilization(
    people: &[Person],
    allocations: &[Allocation],
    window: DateRange,
) -> Vec<PersonUtilization> {
    people
        .iter()
        .map(|person| PersonUtilization {
            person_id: person.id.clone(),
            person_name: person.name.clone(),
            utilization_percentage: person_utilization(&person.id, allocations, window),
        })
        .collect()
}

/// Mean utilization across everyone; zero for an empty organization
pub fn overall_utilization(utilization: &[PersonUtilization]) -> f64 {
    if utilization.is_empty() {
        return 0.0;
    }
    let total: i64 = utilization.iter().map(|u| u.utilization_percentage).sum();
    total as f64 / utilization.len() as f64
}
