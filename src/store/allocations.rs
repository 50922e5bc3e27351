use super::{new_id, WorkforceStore};
use crate::analysis::DateRange;
use crate::error::{PlanningError, Result};
use crate::planning::{validation, Allocation, AllocationUpdate, NewAllocation};

const SELECT_ALLOCATION: &str = r#"
    SELECT id, project_id, person_id, role_type_id, requirement_id, allocation_percentage,
           start_date, end_date, person_name, project_name, role_type_name,
           created_at, updated_at
    FROM project_allocations_detailed
"#;

impl WorkforceStore {
    /// Every allocation ordered by start date
    pub async fn list_allocations(&self) -> Result<Vec<Allocation>> {
        let sql = format!("{SELECT_ALLOCATION} ORDER BY start_date");
        let allocations = sqlx::query_as::<_, Allocation>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(allocations)
    }

    pub async fn list_project_allocations(&self, project_id: &str) -> Result<Vec<Allocation>> {
        let sql = format!("{SELECT_ALLOCATION} WHERE project_id = ? ORDER BY start_date");
        let allocations = sqlx::query_as::<_, Allocation>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(allocations)
    }

    pub async fn list_person_allocations(&self, person_id: &str) -> Result<Vec<Allocation>> {
        let sql = format!("{SELECT_ALLOCATION} WHERE person_id = ? ORDER BY start_date");
        let allocations = sqlx::query_as::<_, Allocation>(&sql)
            .bind(person_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(allocations)
    }

    /// A person's allocations touching `window` (bounds included)
    pub async fn list_person_allocations_in(
        &self,
        person_id: &str,
        window: DateRange,
    ) -> Result<Vec<Allocation>> {
        let sql = format!(
            "{SELECT_ALLOCATION} WHERE person_id = ? AND end_date >= ? AND start_date <= ? ORDER BY start_date"
        );
        let allocations = sqlx::query_as::<_, Allocation>(&sql)
            .bind(person_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(&self.pool)
            .await?;
        Ok(allocations)
    }

    pub async fn get_allocation(&self, id: &str) -> Result<Allocation> {
        let sql = format!("{SELECT_ALLOCATION} WHERE id = ?");
        sqlx::query_as::<_, Allocation>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PlanningError::not_found("Allocation", id))
    }

    /// A linked requirement must exist and belong to the allocation's project
    async fn check_requirement_link(&self, requirement_id: &str, project_id: &str) -> Result<()> {
        let requirement = self.get_requirement(requirement_id).await.map_err(|e| match e {
            PlanningError::NotFound { .. } => {
                PlanningError::validation("Requirement does not exist")
            }
            other => other,
        })?;

        if requirement.project_id != project_id {
            return Err(PlanningError::validation(
                "Requirement belongs to a different project",
            ));
        }
        Ok(())
    }

    pub async fn create_allocation(&self, input: &NewAllocation) -> Result<Allocation> {
        validation::validate_allocation(
            &input.person_id,
            &input.project_id,
            &input.role_type_id,
            input.allocation_percentage,
            input.start_date,
            input.end_date,
        )?;
        if let Some(requirement_id) = &input.requirement_id {
            self.check_requirement_link(requirement_id, &input.project_id)
                .await?;
        }

        let id = new_id();
        sqlx::query(
            r#"
            INSERT INTO project_allocations
                (id, project_id, person_id, role_type_id, requirement_id,
                 allocation_percentage, start_date, end_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.project_id)
        .bind(&input.person_id)
        .bind(&input.role_type_id)
        .bind(&input.requirement_id)
        .bind(input.allocation_percentage)
        .bind(input.start_date)
        .bind(input.end_date)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            "📌 Allocated person {} to project {} at {}% ({})",
            input.person_id,
            input.project_id,
            input.allocation_percentage,
            id
        );
        self.get_allocation(&id).await
    }

    pub async fn update_allocation(&self, id: &str, patch: AllocationUpdate) -> Result<Allocation> {
        let mut allocation = self.get_allocation(id).await?;
        let relinked = patch.requirement_id.is_some();
        patch.apply_to(&mut allocation);
        validation::validate_allocation(
            &allocation.person_id,
            &allocation.project_id,
            &allocation.role_type_id,
            allocation.allocation_percentage,
            allocation.start_date,
            allocation.end_date,
        )?;
        if relinked {
            if let Some(requirement_id) = &allocation.requirement_id {
                self.check_requirement_link(requirement_id, &allocation.project_id)
                    .await?;
            }
        }

        sqlx::query(
            r#"
            UPDATE project_allocations
            SET person_id = ?, role_type_id = ?, requirement_id = ?, allocation_percentage = ?,
                start_date = ?, end_date = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&allocation.person_id)
        .bind(&allocation.role_type_id)
        .bind(&allocation.requirement_id)
        .bind(allocation.allocation_percentage)
        .bind(allocation.start_date)
        .bind(allocation.end_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        tracing::info!("📌 Updated allocation: {}", id);
        self.get_allocation(id).await
    }

    pub async fn delete_allocation(&self, id: &str) -> Result<()> {
        self.delete_by_id("project_allocations", "Allocation", id)
            .await
    }
}
