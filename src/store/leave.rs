use super::{new_id, WorkforceStore};
use crate::error::{PlanningError, Result};
use crate::planning::{validation, LeavePeriod, LeaveStatus, LeaveUpdate, NewLeavePeriod};

const SELECT_LEAVE: &str = r#"
    SELECT l.id, l.person_id, l.start_date, l.end_date, l.leave_type, l.notes, l.status,
           p.name AS person_name, rt.name AS role_type_name,
           l.created_at, l.updated_at
    FROM leave_periods l
    JOIN people p ON p.id = l.person_id
    LEFT JOIN role_types rt ON rt.id = p.role_type_id
"#;

impl WorkforceStore {
    /// Leave periods ordered by start date, optionally only those with `status`
    pub async fn list_leave(&self, status: Option<LeaveStatus>) -> Result<Vec<LeavePeriod>> {
        let leave = match status {
            Some(status) => {
                let sql = format!("{SELECT_LEAVE} WHERE l.status = ? ORDER BY l.start_date");
                sqlx::query_as::<_, LeavePeriod>(&sql)
                    .bind(status)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("{SELECT_LEAVE} ORDER BY l.start_date");
                sqlx::query_as::<_, LeavePeriod>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(leave)
    }

    pub async fn list_person_leave(&self, person_id: &str) -> Result<Vec<LeavePeriod>> {
        let sql = format!("{SELECT_LEAVE} WHERE l.person_id = ? ORDER BY l.start_date");
        let leave = sqlx::query_as::<_, LeavePeriod>(&sql)
            .bind(person_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(leave)
    }

    pub async fn get_leave(&self, id: &str) -> Result<LeavePeriod> {
        let sql = format!("{SELECT_LEAVE} WHERE l.id = ?");
        sqlx::query_as::<_, LeavePeriod>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PlanningError::not_found("Leave period", id))
    }

    pub async fn create_leave(&self, input: &NewLeavePeriod) -> Result<LeavePeriod> {
        validation::validate_leave(&input.person_id, input.start_date, input.end_date)?;

        let id = new_id();
        sqlx::query(
            r#"
            INSERT INTO leave_periods (id, person_id, start_date, end_date, leave_type, notes, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.person_id)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.leave_type)
        .bind(&input.notes)
        .bind(input.status)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            "🌴 Recorded leave for person {}: {} to {} ({})",
            input.person_id,
            input.start_date,
            input.end_date,
            id
        );
        self.get_leave(&id).await
    }

    pub async fn update_leave(&self, id: &str, patch: LeaveUpdate) -> Result<LeavePeriod> {
        let mut leave = self.get_leave(id).await?;
        patch.apply_to(&mut leave);
        validation::validate_leave(&leave.person_id, leave.start_date, leave.end_date)?;

        sqlx::query(
            r#"
            UPDATE leave_periods
            SET start_date = ?, end_date = ?, leave_type = ?, notes = ?, status = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(&leave.leave_type)
        .bind(&leave.notes)
        .bind(leave.status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        tracing::info!("🌴 Updated leave period: {}", id);
        self.get_leave(id).await
    }

    pub async fn update_leave_status(&self, id: &str, status: LeaveStatus) -> Result<LeavePeriod> {
        let result = sqlx::query(
            "UPDATE leave_periods SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PlanningError::not_found("Leave period", id));
        }

        tracing::info!("🌴 Leave period {} is now {}", id, status.as_str());
        self.get_leave(id).await
    }

    pub async fn delete_leave(&self, id: &str) -> Result<()> {
        self.delete_by_id("leave_periods", "Leave period", id).await
    }
}
