//! Repository for the `publishers` table.

use sqlx::PgPool;
use tankobon_core::types::DbId;

use crate::models::publisher::{CreatePublisher, Publisher, UpdatePublisher};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for publishers.
pub struct PublisherRepo;

impl PublisherRepo {
    /// Insert a new publisher.
    pub async fn create(pool: &PgPool, input: &CreatePublisher) -> Result<Publisher, sqlx::Error> {
        let query = format!("INSERT INTO publishers (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Publisher>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a publisher by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Publisher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publishers WHERE id = $1");
        sqlx::query_as::<_, Publisher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a publisher by exact (case-sensitive) name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Publisher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publishers WHERE name = $1");
        sqlx::query_as::<_, Publisher>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all publishers alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Publisher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publishers ORDER BY name");
        sqlx::query_as::<_, Publisher>(&query).fetch_all(pool).await
    }

    /// Rename a publisher. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePublisher,
    ) -> Result<Option<Publisher>, sqlx::Error> {
        let query = format!(
            "UPDATE publishers SET name = COALESCE($2, name) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publisher>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a publisher. Fails with a foreign key violation while manga
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM publishers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
