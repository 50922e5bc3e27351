/// Calendar-date interval arithmetic
///
/// Every dated record (project, requirement, allocation, leave) covers an inclusive
/// range of days. Coverage checks use inclusive overlap; visual row packing uses the
/// stricter exclusive form so back-to-back items can share a row.

use crate::planning::{Allocation, LeavePeriod, Project, Requirement};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Ranges share at least one day
    #[inline]
    pub fn overlaps_inclusive(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Ranges share more than a boundary point
    #[inline]
    pub fn overlaps_exclusive(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Whether `date` falls inside the range (bounds included)
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn duration_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }

    /// Days overlapping with `other`, counting both ends; zero when disjoint
    pub fn overlap_days(&self, other: &Self) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end < start {
            0
        } else {
            days_between(start, end) + 1
        }
    }
}

/// Signed whole days from `from` to `to`
#[inline]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Anything that occupies a range of calendar days
pub trait Dated {
    fn date_range(&self) -> DateRange;
}

macro_rules! impl_dated {
    ($($ty:ty),*) => {
        $(impl Dated for $ty {
            fn date_range(&self) -> DateRange {
                DateRange::new(self.start_date, self.end_date)
            }
        })*
    };
}

impl_dated!(Project, Requirement, Allocation, LeavePeriod);
