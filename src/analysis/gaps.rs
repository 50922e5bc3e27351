/// Gap detection for project requirements
///
/// A requirement is covered by the allocations linked to it plus any legacy
/// allocations (no requirement link) of the same role type that overlap its dates.
/// Each allocation contributes its percentage as a fraction of one person.

use crate::analysis::interval::Dated;
use crate::planning::{Allocation, Requirement};
use chrono::NaiveDate;
use serde::Serialize;

/// Unfilled capacity on a single requirement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementGap {
    pub requirement_id: String,
    pub role_type_id: String,
    pub role_type_name: Option<String>,
    pub required_count: i64,
    pub allocated_count: f64,
    pub gap_count: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Allocations that count toward `requirement`
pub fn matching_allocations<'a>(
    requirement: &Requirement,
    allocations: &'a [Allocation],
) -> Vec<&'a Allocation> {
    let direct = allocations
        .iter()
        .filter(|a| a.requirement_id.as_deref() == Some(requirement.id.as_str()));

    let legacy = allocations.iter().filter(|a| {
        a.requirement_id.is_none()
            && a.role_type_id == requirement.role_type_id
            && a.date_range().overlaps_inclusive(&requirement.date_range())
    });

    direct.chain(legacy).collect()
}

/// Number of people covering `requirement`, in fractional headcount
pub fn allocated_count(requirement: &Requirement, allocations: &[Allocation]) -> f64 {
    matching_allocations(requirement, allocations)
        .iter()
        .map(|a| a.allocation_percentage as f64 / 100.0)
        .sum()
}

/// Requirements whose coverage falls short of `required_count`, in input order
pub fn project_gaps(requirements: &[Requirement], allocations: &[Allocation]) -> Vec<RequirementGap> {
    requirements
        .iter()
        .filter_map(|requirement| {
            let allocated = allocated_count(requirement, allocations);
            let gap = requirement.required_count as f64 - allocated;
            (gap > 0.0).then(|| RequirementGap {
                requirement_id: requirement.id.clone(),
                role_type_id: requirement.role_type_id.clone(),
                role_type_name: requirement.role_type_name.clone(),
                required_count: requirement.required_count,
                allocated_count: allocated,
                gap_count: gap,
                start_date: requirement.start_date,
                end_date: requirement.end_date,
            })
        })
        .collect()
}
