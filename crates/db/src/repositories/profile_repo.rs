//! Repository for the `profiles` table.
//!
//! Profiles are soft-deleted. `find_by_id` and the default `list` only see
//! active rows.

use sqlx::PgPool;
use tankobon_core::types::DbId;

use crate::models::profile::{CreateProfile, Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, profile_picture, is_active, created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new (active) profile.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (name, profile_picture) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.name)
            .bind(&input.profile_picture)
            .fetch_one(pool)
            .await
    }

    /// Find an active profile by ID. Inactive profiles return `None`.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List profiles, optionally including inactive ones.
    ///
    /// Ordered by creation date.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Profile>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM profiles ORDER BY created_at, id")
        } else {
            format!("SELECT {COLUMNS} FROM profiles WHERE is_active = true ORDER BY created_at, id")
        };
        sqlx::query_as::<_, Profile>(&query).fetch_all(pool).await
    }

    /// Update an active profile. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET \
                name = COALESCE($2, name), \
                profile_picture = COALESCE($3, profile_picture) \
             WHERE id = $1 AND is_active = true \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.profile_picture)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a profile (set is_active = false). The row is kept.
    ///
    /// Returns `false` if the profile does not exist or is already inactive.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE profiles SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
