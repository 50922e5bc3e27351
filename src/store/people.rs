use super::{new_id, WorkforceStore};
use crate::error::{PlanningError, Result};
use crate::planning::{validation, NewPerson, Person, PersonUpdate};

const SELECT_PERSON: &str =
    "SELECT id, name, role_type_id, role_type_name, created_at, updated_at FROM people_with_roles";

impl WorkforceStore {
    /// Everyone with their role name, ordered by name
    pub async fn list_people(&self) -> Result<Vec<Person>> {
        let sql = format!("{SELECT_PERSON} ORDER BY name");
        let people = sqlx::query_as::<_, Person>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(people)
    }

    pub async fn get_person(&self, id: &str) -> Result<Person> {
        let sql = format!("{SELECT_PERSON} WHERE id = ?");
        sqlx::query_as::<_, Person>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PlanningError::not_found("Person", id))
    }

    pub async fn create_person(&self, input: &NewPerson) -> Result<Person> {
        validation::validate_person(&input.name, &input.role_type_id)?;

        let id = new_id();
        sqlx::query("INSERT INTO people (id, name, role_type_id) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&input.name)
            .bind(&input.role_type_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("👤 Created person: {} ({})", input.name, id);
        // re-read through the view to pick up the role name
        self.get_person(&id).await
    }

    pub async fn update_person(&self, id: &str, patch: PersonUpdate) -> Result<Person> {
        let mut person = self.get_person(id).await?;
        patch.apply_to(&mut person);
        validation::validate_person(&person.name, &person.role_type_id)?;

        sqlx::query(
            r#"
            UPDATE people
            SET name = ?, role_type_id = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&person.name)
        .bind(&person.role_type_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        tracing::info!("👤 Updated person: {}", id);
        self.get_person(id).await
    }

    /// Delete a person with no allocations; their leave periods go with them
    pub async fn delete_person(&self, id: &str) -> Result<()> {
        let allocations = self
            .count_where("project_allocations", "person_id", id)
            .await?;

        if allocations > 0 {
            tracing::warn!("⚠️ Refusing to delete person {}: {} allocations", id, allocations);
            return Err(PlanningError::conflict(
                "Cannot delete person with active project allocations",
            ));
        }

        self.delete_by_id("people", "Person", id).await
    }
}
