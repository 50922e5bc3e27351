/// Input rules checked before any write reaches the database
///
/// Creates validate the request body; updates validate the record after the patch
/// has been applied, so partial updates cannot slip an invalid combination through.

use crate::error::{PlanningError, Result};
use chrono::NaiveDate;

pub const ROLE_TYPE_NAME_MAX: usize = 100;
pub const PERSON_NAME_MAX: usize = 100;
pub const PROJECT_NAME_MAX: usize = 200;
/// Largest headcount a single requirement may ask for
pub const REQUIRED_COUNT_MAX: i64 = 1000;

fn check_name(name: &str, label: &str, max: usize) -> Result<()> {
    if name.is_empty() {
        return Err(PlanningError::validation(format!("{label} name is required")));
    }
    if name.chars().count() > max {
        return Err(PlanningError::validation(format!(
            "Name must be less than {max} characters"
        )));
    }
    Ok(())
}

fn check_required(value: &str, message: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PlanningError::validation(message));
    }
    Ok(())
}

fn check_not_before(start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    if end_date < start_date {
        return Err(PlanningError::validation(
            "End date must be on or after start date",
        ));
    }
    Ok(())
}

pub fn validate_role_type(name: &str) -> Result<()> {
    check_name(name, "Role type", ROLE_TYPE_NAME_MAX)
}

pub fn validate_person(name: &str, role_type_id: &str) -> Result<()> {
    check_name(name, "Person", PERSON_NAME_MAX)?;
    check_required(role_type_id, "Role type is required")
}

/// Projects need a strictly positive span
pub fn validate_project(name: &str, start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    check_name(name, "Project", PROJECT_NAME_MAX)?;
    if end_date <= start_date {
        return Err(PlanningError::validation(
            "End date must be after start date",
        ));
    }
    Ok(())
}

pub fn validate_requirement(
    role_type_id: &str,
    required_count: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<()> {
    check_required(role_type_id, "Role type is required")?;
    if required_count < 1 {
        return Err(PlanningError::validation(
            "Required count must be at least 1",
        ));
    }
    if required_count > REQUIRED_COUNT_MAX {
        return Err(PlanningError::validation(format!(
            "Required count must be at most {REQUIRED_COUNT_MAX}"
        )));
    }
    check_not_before(start_date, end_date)
}

pub fn validate_allocation(
    person_id: &str,
    project_id: &str,
    role_type_id: &str,
    percentage: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<()> {
    check_required(person_id, "Person is required")?;
    check_required(project_id, "Project is required")?;
    check_required(role_type_id, "Role type is required")?;
    if !(1..=100).contains(&percentage) {
        return Err(PlanningError::validation(
            "Allocation percentage must be between 1 and 100",
        ));
    }
    check_not_before(start_date, end_date)
}

pub fn validate_leave(person_id: &str, start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    check_required(person_id, "Person is required")?;
    check_not_before(start_date, end_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_role_type_name_bounds() {
        assert!(validate_role_type("Engineer").is_ok());
        assert!(validate_role_type("").is_err());
        assert!(validate_role_type(&"x".repeat(100)).is_ok());
        assert!(validate_role_type(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_person_requires_role() {
        assert!(validate_person("Ada", "rt-1").is_ok());
        let err = validate_person("Ada", "").unwrap_err();
        assert_eq!(err.to_string(), "Role type is required");
    }

    #[test]
    fn test_project_end_must_follow_start() {
        assert!(validate_project("Apollo", date(2025, 1, 1), date(2025, 1, 2)).is_ok());
        let err = validate_project("Apollo", date(2025, 1, 1), date(2025, 1, 1)).unwrap_err();
        assert_eq!(err.to_string(), "End date must be after start date");
        assert!(validate_project(&"p".repeat(201), date(2025, 1, 1), date(2025, 2, 1)).is_err());
    }

    #[test]
    fn test_requirement_count_and_dates() {
        assert!(validate_requirement("rt", 1, date(2025, 1, 1), date(2025, 1, 1)).is_ok());
        assert!(validate_requirement("rt", 0, date(2025, 1, 1), date(2025, 2, 1)).is_err());
        assert!(validate_requirement("rt", 2, date(2025, 2, 1), date(2025, 1, 1)).is_err());
    }

    #[test]
    fn test_requirement_count_upper_bound() {
        let (s, e) = (date(2025, 1, 1), date(2025, 2, 1));
        assert!(validate_requirement("rt", REQUIRED_COUNT_MAX, s, e).is_ok());
        let err = validate_requirement("rt", REQUIRED_COUNT_MAX + 1, s, e).unwrap_err();
        assert_eq!(err.to_string(), "Required count must be at most 1000");
        assert!(validate_requirement("rt", i64::MAX, s, e).is_err());
    }

    #[test]
    fn test_allocation_percentage_range() {
        let (s, e) = (date(2025, 1, 1), date(2025, 3, 1));
        assert!(validate_allocation("p", "pr", "rt", 1, s, e).is_ok());
        assert!(validate_allocation("p", "pr", "rt", 100, s, e).is_ok());
        assert!(validate_allocation("p", "pr", "rt", 0, s, e).is_err());
        assert!(validate_allocation("p", "pr", "rt", 101, s, e).is_err());
        assert!(validate_allocation("", "pr", "rt", 50, s, e).is_err());
    }

    #[test]
    fn test_leave_dates() {
        assert!(validate_leave("p", date(2025, 5, 1), date(2025, 5, 3)).is_ok());
        assert!(validate_leave("p", date(2025, 5, 3), date(2025, 5, 1)).is_err());
    }
}
