/// SQLite persistence layer for planning records
///
/// Owns the connection pool and the schema: six tables plus the three detailed views
/// the read paths go through. CRUD operations live in one file per entity, all as
/// methods on [`WorkforceStore`].
///
/// Referential integrity is left to SQLite's foreign-key constraints; the few domain
/// rules that need more ("role type in use") are checked right before the delete.

use crate::error::{PlanningError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

mod allocations;
mod leave;
mod people;
mod projects;
mod requirements;
mod role_types;

/// SQLite-backed store shared by all request handlers
///
/// Cloning is cheap: the pool is reference-counted internally.
#[derive(Debug, Clone)]
pub struct WorkforceStore {
    pool: SqlitePool,
}

impl WorkforceStore {
    /// Wrap an existing pool; the schema must already be initialised
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database file under `data_dir` and initialise the schema
    pub async fn open(data_dir: &str, db_file: &str) -> anyhow::Result<Self> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| anyhow::anyhow!("Failed to create data directory '{}': {}", data_dir, e))?;
        let db_path = Path::new(data_dir).join(db_file);

        tracing::info!("🗄️ Opening workforce database: {}", db_path.display());

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(options).await?;

        let store = Self::new(pool);
        store.init_schema().await?;

        tracing::info!("✅ Workforce database ready: {}", db_path.display());

        Ok(store)
    }

    /// Private in-memory database, used by tests and throwaway runs
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is pinned to
    /// a single connection that is never recycled.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables, indexes and views
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Count rows in `table` whose `column` equals `value`
    ///
    /// Table and column names come from this module only, never from input.
    async fn count_where(&self, table: &str, column: &str, value: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?");
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Delete one row by id, mapping "no row" to not found
    async fn delete_by_id(&self, table: &str, entity: &'static str, id: &str) -> Result<()> {
        let sql = format!("DELETE FROM {table} WHERE id = ?");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(PlanningError::not_found(entity, id));
        }
        tracing::info!("🗑️ Deleted {}: {}", entity, id);
        Ok(())
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS role_types (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        description TEXT,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS people (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        role_type_id TEXT NOT NULL REFERENCES role_types(id),
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS project_resource_requirements (
        id TEXT PRIMARY KEY,
        project_id TEXT NOT NULL REFERENCES projects(id),
        role_type_id TEXT NOT NULL REFERENCES role_types(id),
        required_count INTEGER NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS project_allocations (
        id TEXT PRIMARY KEY,
        project_id TEXT NOT NULL REFERENCES projects(id),
        person_id TEXT NOT NULL REFERENCES people(id),
        role_type_id TEXT NOT NULL REFERENCES role_types(id),
        requirement_id TEXT REFERENCES project_resource_requirements(id) ON DELETE SET NULL,
        allocation_percentage INTEGER NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leave_periods (
        id TEXT PRIMARY KEY,
        person_id TEXT NOT NULL REFERENCES people(id) ON DELETE CASCADE,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        leave_type TEXT,
        notes TEXT,
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK (status IN ('pending', 'approved', 'unapproved')),
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_people_role_type ON people(role_type_id)",
    "CREATE INDEX IF NOT EXISTS idx_requirements_project ON project_resource_requirements(project_id)",
    "CREATE INDEX IF NOT EXISTS idx_allocations_project ON project_allocations(project_id)",
    "CREATE INDEX IF NOT EXISTS idx_allocations_person ON project_allocations(person_id)",
    "CREATE INDEX IF NOT EXISTS idx_leave_person ON leave_periods(person_id)",
    r#"
    CREATE VIEW IF NOT EXISTS people_with_roles AS
    SELECT p.id, p.name, p.role_type_id, rt.name AS role_type_name,
           p.created_at, p.updated_at
    FROM people p
    LEFT JOIN role_types rt ON rt.id = p.role_type_id
    "#,
    r#"
    CREATE VIEW IF NOT EXISTS project_requirements_detailed AS
    SELECT r.id, r.project_id, r.role_type_id, r.required_count,
           r.start_date, r.end_date,
           rt.name AS role_type_name, pr.name AS project_name,
           r.created_at, r.updated_at
    FROM project_resource_requirements r
    LEFT JOIN role_types rt ON rt.id = r.role_type_id
    LEFT JOIN projects pr ON pr.id = r.project_id
    "#,
    r#"
    CREATE VIEW IF NOT EXISTS project_allocations_detailed AS
    SELECT a.id, a.project_id, a.person_id, a.role_type_id, a.requirement_id,
           a.allocation_percentage, a.start_date, a.end_date,
           pe.name AS person_name, pr.name AS project_name, rt.name AS role_type_name,
           a.created_at, a.updated_at
    FROM project_allocations a
    LEFT JOIN people pe ON pe.id = a.person_id
    LEFT JOIN projects pr ON pr.id = a.project_id
    LEFT JOIN role_types rt ON rt.id = a.role_type_id
    "#,
];
