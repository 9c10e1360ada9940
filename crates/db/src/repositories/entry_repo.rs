//! Repository for the `entries` table.

use sqlx::PgPool;
use tankobon_core::types::DbId;

use crate::models::entry::{CreateEntry, Entry, EntryWithManga, UpdateEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, manga_id, profile_id, quantity, pending, priority, created_at, updated_at";

/// Columns for entries joined with `manga m` (entry aliased `e`).
const JOINED_COLUMNS: &str = "e.id, e.manga_id, m.name AS manga_name, m.volumes, \
                              e.profile_id, e.quantity, e.pending, e.priority";

/// Provides CRUD operations for entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert a new entry, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEntry) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries (manga_id, profile_id, quantity, pending, priority) \
             VALUES ($1, $2, COALESCE($3, 0), $4, COALESCE($5, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(input.manga_id)
            .bind(input.profile_id)
            .bind(input.quantity)
            .bind(&input.pending)
            .bind(input.priority)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE id = $1");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every entry, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries ORDER BY id");
        sqlx::query_as::<_, Entry>(&query).fetch_all(pool).await
    }

    /// List a profile's entries with manga name and volume count.
    pub async fn list_by_profile(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<EntryWithManga>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM entries e \
             JOIN manga m ON m.id = e.manga_id \
             WHERE e.profile_id = $1 \
             ORDER BY lower(m.name), e.id"
        );
        sqlx::query_as::<_, EntryWithManga>(&query)
            .bind(profile_id)
            .fetch_all(pool)
            .await
    }

    /// All entries belonging to either profile, in one query.
    pub async fn find_by_profile_ids(
        pool: &PgPool,
        first: DbId,
        second: DbId,
    ) -> Result<Vec<EntryWithManga>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM entries e \
             JOIN manga m ON m.id = e.manga_id \
             WHERE e.profile_id IN ($1, $2) \
             ORDER BY e.id"
        );
        sqlx::query_as::<_, EntryWithManga>(&query)
            .bind(first)
            .bind(second)
            .fetch_all(pool)
            .await
    }

    /// Update an entry. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEntry,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET \
                quantity = COALESCE($2, quantity), \
                pending = COALESCE($3, pending), \
                priority = COALESCE($4, priority) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(input.quantity)
            .bind(&input.pending)
            .bind(input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an entry.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a profile's entries. Lets callers verify how much of a failed
    /// import was committed.
    pub async fn count_by_profile(pool: &PgPool, profile_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entries WHERE profile_id = $1")
            .bind(profile_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
