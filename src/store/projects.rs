use super::{new_id, WorkforceStore};
use crate::error::{PlanningError, Result};
use crate::planning::{validation, NewProject, Project, ProjectUpdate};

const SELECT_PROJECT: &str =
    "SELECT id, name, start_date, end_date, created_at, updated_at FROM projects";

impl WorkforceStore {
    /// All projects ordered by name
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let sql = format!("{SELECT_PROJECT} ORDER BY name");
        let projects = sqlx::query_as::<_, Project>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    pub async fn get_project(&self, id: &str) -> Result<Project> {
        let sql = format!("{SELECT_PROJECT} WHERE id = ?");
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PlanningError::not_found("Project", id))
    }

    pub async fn create_project(&self, input: &NewProject) -> Result<Project> {
        validation::validate_project(&input.name, input.start_date, input.end_date)?;

        let id = new_id();
        sqlx::query("INSERT INTO projects (id, name, start_date, end_date) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .execute(&self.pool)
            .await?;

        tracing::info!("📁 Created project: {} ({})", input.name, id);
        self.get_project(&id).await
    }

    pub async fn update_project(&self, id: &str, patch: ProjectUpdate) -> Result<Project> {
        let mut project = self.get_project(id).await?;
        patch.apply_to(&mut project);
        validation::validate_project(&project.name, project.start_date, project.end_date)?;

        sqlx::query(
            r#"
            UPDATE projects
            SET name = ?, start_date = ?, end_date = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&project.name)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        tracing::info!("📁 Updated project: {}", id);
        self.get_project(id).await
    }

    /// Delete a project with no allocations and no requirements
    pub async fn delete_project(&self, id: &str) -> Result<()> {
        let allocations = self
            .count_where("project_allocations", "project_id", id)
            .await?;
        let requirements = self
            .count_where("project_resource_requirements", "project_id", id)
            .await?;

        if allocations > 0 || requirements > 0 {
            tracing::warn!(
                "⚠️ Refusing to delete project {}: {} allocations, {} requirements",
                id,
                allocations,
                requirements
            );
            return Err(PlanningError::conflict(
                "Cannot delete project with active allocations or resource requirements",
            ));
        }

        self.delete_by_id("projects", "Project", id).await
    }
}
