use super::{new_id, WorkforceStore};
use crate::error::{PlanningError, Result};
use crate::planning::{validation, NewRoleType, RoleType, RoleTypeUpdate};

const SELECT_ROLE_TYPE: &str =
    "SELECT id, name, description, created_at, updated_at FROM role_types";

impl WorkforceStore {
    /// All role types ordered by name
    pub async fn list_role_types(&self) -> Result<Vec<RoleType>> {
        let sql = format!("{SELECT_ROLE_TYPE} ORDER BY name");
        let role_types = sqlx::query_as::<_, RoleType>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(role_types)
    }

    pub async fn get_role_type(&self, id: &str) -> Result<RoleType> {
        let sql = format!("{SELECT_ROLE_TYPE} WHERE id = ?");
        sqlx::query_as::<_, RoleType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PlanningError::not_found("Role type", id))
    }

    pub async fn create_role_type(&self, input: &NewRoleType) -> Result<RoleType> {
        validation::validate_role_type(&input.name)?;

        let id = new_id();
        sqlx::query("INSERT INTO role_types (id, name, description) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&input.name)
            .bind(&input.description)
            .execute(&self.pool)
            .await?;

        tracing::info!("🏷️ Created role type: {} ({})", input.name, id);
        self.get_role_type(&id).await
    }

    pub async fn update_role_type(&self, id: &str, patch: RoleTypeUpdate) -> Result<RoleType> {
        let mut role_type = self.get_role_type(id).await?;
        patch.apply_to(&mut role_type);
        validation::validate_role_type(&role_type.name)?;

        sqlx::query(
            r#"
            UPDATE role_types
            SET name = ?, description = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&role_type.name)
        .bind(&role_type.description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        tracing::info!("🏷️ Updated role type: {}", id);
        self.get_role_type(id).await
    }

    /// Delete a role type no person, requirement or allocation references
    pub async fn delete_role_type(&self, id: &str) -> Result<()> {
        let people = self.count_where("people", "role_type_id", id).await?;
        let requirements = self
            .count_where("project_resource_requirements", "role_type_id", id)
            .await?;
        let allocations = self
            .count_where("project_allocations", "role_type_id", id)
            .await?;

        if people > 0 || requirements > 0 || allocations > 0 {
            tracing::warn!(
                "⚠️ Refusing to delete role type {}: {} people, {} requirements, {} allocations",
                id,
                people,
                requirements,
                allocations
            );
            return Err(PlanningError::conflict(
                "Cannot delete role type that is currently in use",
            ));
        }

        self.delete_by_id("role_types", "Role type", id).await
    }
}
