use super::{new_id, WorkforceStore};
use crate::error::{PlanningError, Result};
use crate::planning::{validation, NewRequirement, Requirement, RequirementUpdate};

const SELECT_REQUIREMENT: &str = r#"
    SELECT id, project_id, role_type_id, required_count, start_date, end_date,
           role_type_name, project_name, created_at, updated_at
    FROM project_requirements_detailed
"#;

impl WorkforceStore {
    /// A project's requirements ordered by start date
    pub async fn list_project_requirements(&self, project_id: &str) -> Result<Vec<Requirement>> {
        let sql = format!("{SELECT_REQUIREMENT} WHERE project_id = ? ORDER BY start_date");
        let requirements = sqlx::query_as::<_, Requirement>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(requirements)
    }

    pub async fn get_requirement(&self, id: &str) -> Result<Requirement> {
        let sql = format!("{SELECT_REQUIREMENT} WHERE id = ?");
        sqlx::query_as::<_, Requirement>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PlanningError::not_found("Requirement", id))
    }

    pub async fn create_requirement(
        &self,
        project_id: &str,
        input: &NewRequirement,
    ) -> Result<Requirement> {
        validation::validate_requirement(
            &input.role_type_id,
            input.required_count,
            input.start_date,
            input.end_date,
        )?;
        // 404 for an unknown project rather than a foreign-key validation error
        self.get_project(project_id).await?;

        let id = new_id();
        sqlx::query(
            r#"
            INSERT INTO project_resource_requirements
                (id, project_id, role_type_id, required_count, start_date, end_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(project_id)
        .bind(&input.role_type_id)
        .bind(input.required_count)
        .bind(input.start_date)
        .bind(input.end_date)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            "📋 Created requirement {} on project {}: {} x {}",
            id,
            project_id,
            input.required_count,
            input.role_type_id
        );
        self.get_requirement(&id).await
    }

    pub async fn update_requirement(
        &self,
        id: &str,
        patch: RequirementUpdate,
    ) -> Result<Requirement> {
        let mut requirement = self.get_requirement(id).await?;
        patch.apply_to(&mut requirement);
        validation::validate_requirement(
            &requirement.role_type_id,
            requirement.required_count,
            requirement.start_date,
            requirement.end_date,
        )?;

        sqlx::query(
            r#"
            UPDATE project_resource_requirements
            SET role_type_id = ?, required_count = ?, start_date = ?, end_date = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&requirement.role_type_id)
        .bind(requirement.required_count)
        .bind(requirement.start_date)
        .bind(requirement.end_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        tracing::info!("📋 Updated requirement: {}", id);
        self.get_requirement(id).await
    }

    /// Delete a requirement; allocations linked to it become unlinked
    pub async fn delete_requirement(&self, id: &str) -> Result<()> {
        self.delete_by_id("project_resource_requirements", "Requirement", id)
            .await
    }
}
