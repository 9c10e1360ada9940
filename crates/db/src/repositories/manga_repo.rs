//! Repository for the `manga` table.

use sqlx::PgPool;
use tankobon_core::collection::UNKNOWN_LOOKUP_ID;
use tankobon_core::types::DbId;

use crate::models::manga::{CreateManga, Manga, MangaWithLookups, UpdateManga};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, volumes, format_id, publisher_id, created_at, updated_at";

/// Provides CRUD operations for manga.
pub struct MangaRepo;

impl MangaRepo {
    /// Insert a new manga. Missing format/publisher ids fall back to the
    /// seeded "Unknown" rows.
    pub async fn create(pool: &PgPool, input: &CreateManga) -> Result<Manga, sqlx::Error> {
        let query = format!(
            "INSERT INTO manga (name, volumes, format_id, publisher_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manga>(&query)
            .bind(&input.name)
            .bind(input.volumes)
            .bind(input.format_id.unwrap_or(UNKNOWN_LOOKUP_ID))
            .bind(input.publisher_id.unwrap_or(UNKNOWN_LOOKUP_ID))
            .fetch_one(pool)
            .await
    }

    /// Find a manga by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Manga>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manga WHERE id = $1");
        sqlx::query_as::<_, Manga>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the oldest manga whose name matches ignoring case.
    pub async fn find_by_name_case_insensitive(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Manga>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM manga \
             WHERE lower(name) = lower($1) \
             ORDER BY id \
             LIMIT 1"
        );
        sqlx::query_as::<_, Manga>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all manga with their format and publisher names, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<MangaWithLookups>, sqlx::Error> {
        sqlx::query_as::<_, MangaWithLookups>(
            "SELECT m.id, m.name, m.volumes, \
                    m.format_id, f.name AS format_name, \
                    m.publisher_id, p.name AS publisher_name \
             FROM manga m \
             JOIN formats f ON f.id = m.format_id \
             JOIN publishers p ON p.id = m.publisher_id \
             ORDER BY lower(m.name), m.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a manga. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateManga,
    ) -> Result<Option<Manga>, sqlx::Error> {
        let query = format!(
            "UPDATE manga SET \
                name = COALESCE($2, name), \
                volumes = COALESCE($3, volumes), \
                format_id = COALESCE($4, format_id), \
                publisher_id = COALESCE($5, publisher_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manga>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.volumes)
            .bind(input.format_id)
            .bind(input.publisher_id)
            .fetch_optional(pool)
            .await
    }

    /// Reassign format and publisher. Used by imports (last import wins).
    pub async fn update_lookups(
        pool: &PgPool,
        id: DbId,
        format_id: DbId,
        publisher_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE manga SET format_id = $2, publisher_id = $3 WHERE id = $1")
                .bind(id)
                .bind(format_id)
                .bind(publisher_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a manga and, by cascade, every entry that references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM manga WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
