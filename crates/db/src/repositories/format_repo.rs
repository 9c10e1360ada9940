//! Repository for the `formats` table.

use sqlx::PgPool;
use tankobon_core::types::DbId;

use crate::models::format::{CreateFormat, Format, UpdateFormat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for formats.
pub struct FormatRepo;

impl FormatRepo {
    /// Insert a new format, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFormat) -> Result<Format, sqlx::Error> {
        let query = format!("INSERT INTO formats (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Format>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a format by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Format>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM formats WHERE id = $1");
        sqlx::query_as::<_, Format>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a format by exact (case-sensitive) name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Format>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM formats WHERE name = $1");
        sqlx::query_as::<_, Format>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all formats ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Format>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM formats ORDER BY name");
        sqlx::query_as::<_, Format>(&query).fetch_all(pool).await
    }

    /// Rename a format. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFormat,
    ) -> Result<Option<Format>, sqlx::Error> {
        let query = format!(
            "UPDATE formats SET name = COALESCE($2, name) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Format>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a format. Fails with a foreign key violation while manga
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM formats WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
