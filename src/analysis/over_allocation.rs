/// Over-allocation detection
///
/// Allocations are grouped per person and compared pairwise. Every overlapping pair
/// whose combined percentage exceeds 100 is reported as its own conflict.

use crate::analysis::interval::Dated;
use crate::planning::Allocation;
use serde::Serialize;
use std::collections::HashMap;

/// Two overlapping allocations that together exceed a full workload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverAllocation {
    pub person_id: String,
    pub person_name: Option<String>,
    pub total_allocation: i64,
    pub conflicting_allocations: [Allocation; 2],
}

/// Group allocations by person, keeping the order people first appear in
fn group_by_person(allocations: &[Allocation]) -> Vec<Vec<&Allocation>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Allocation>> = Vec::new();

    for allocation in allocations {
        let slot = *index
            .entry(allocation.person_id.as_str())
            .or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[slot].push(allocation);
    }

    groups
}

/// Every conflicting allocation pair, grouped by person
pub fn over_allocated_people(allocations: &[Allocation]) -> Vec<OverAllocation> {
    let mut conflicts = Vec::new();

    for group in group_by_person(allocations) {
        for (i, first) in group.iter().enumerate() {
            for second in &group[i + 1..] {
                if !first.date_range().overlaps_inclusive(&second.date_range()) {
                    continue;
                }

                let total = first.allocation_percentage + second.allocation_percentage;
                if total > 100 {
                    conflicts.push(OverAllocation {
                        person_id: first.person_id.clone(),
                        person_name: first.person_name.clone(),
                        total_allocation: total,
                        conflicting_allocations: [(*first).clone(), (*second).clone()],
                    });
                }
            }
        }
    }

    if !conflicts.is_empty() {
        tracing::debug!("⚠️ Found {} over-allocation conflicts", conflicts.len());
    }

    conflicts
}
