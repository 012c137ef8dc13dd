//! Repository for the `charity_projects` table.

use qrkot_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::charity_project::{CharityProject, CreateCharityProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, full_amount, invested_amount, \
                       fully_invested, create_date, close_date";

/// Provides CRUD and open-pool queries for charity projects.
pub struct CharityProjectRepo;

impl CharityProjectRepo {
    /// Insert a new, unfunded project, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateCharityProject,
    ) -> Result<CharityProject, sqlx::Error> {
        let query = format!(
            "INSERT INTO charity_projects (name, description, full_amount)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CharityProject>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.full_amount)
            .fetch_one(conn)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CharityProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM charity_projects WHERE id = $1");
        sqlx::query_as::<_, CharityProject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID and lock its row until the transaction ends.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<CharityProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM charity_projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, CharityProject>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a project by its exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<CharityProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM charity_projects WHERE name = $1");
        sqlx::query_as::<_, CharityProject>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Whether another project already holds `name`.
    ///
    /// `exclude_id` skips the project being renamed so keeping its own
    /// name is not reported as a clash.
    pub async fn name_taken(
        conn: &mut PgConnection,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM charity_projects
                 WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    /// List projects ordered by ID. A `None` limit returns every row.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<CharityProject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM charity_projects ORDER BY id ASC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, CharityProject>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All open projects, oldest first, ties broken by ID.
    ///
    /// Rows are locked `FOR UPDATE`; call inside the allocation transaction.
    pub async fn list_open(conn: &mut PgConnection) -> Result<Vec<CharityProject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM charity_projects
             WHERE fully_invested = FALSE
             ORDER BY create_date ASC, id ASC
             FOR UPDATE"
        );
        sqlx::query_as::<_, CharityProject>(&query)
            .fetch_all(conn)
            .await
    }

    /// Persist every mutable column of an edited project.
    pub async fn save(
        conn: &mut PgConnection,
        project: &CharityProject,
    ) -> Result<CharityProject, sqlx::Error> {
        let query = format!(
            "UPDATE charity_projects SET
                name = $2,
                description = $3,
                full_amount = $4,
                invested_amount = $5,
                fully_invested = $6,
                close_date = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CharityProject>(&query)
            .bind(project.id)
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.full_amount)
            .bind(project.invested_amount)
            .bind(project.fully_invested)
            .bind(project.close_date)
            .fetch_one(conn)
            .await
    }

    /// Persist the funding state written by an allocation pass.
    pub async fn save_funding(
        conn: &mut PgConnection,
        project: &CharityProject,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE charity_projects SET
                invested_amount = $2,
                fully_invested = $3,
                close_date = $4
             WHERE id = $1",
        )
        .bind(project.id)
        .bind(project.invested_amount)
        .bind(project.fully_invested)
        .bind(project.close_date)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM charity_projects WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
