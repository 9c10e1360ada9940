//! Manga entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tankobon_core::collection::MangaRecord;
use tankobon_core::types::{DbId, Timestamp};

/// A row from the `manga` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Manga {
    pub id: DbId,
    pub name: String,
    /// Total volumes in the series, `None` when unknown.
    pub volumes: Option<i32>,
    pub format_id: DbId,
    pub publisher_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Manga> for MangaRecord {
    fn from(manga: Manga) -> Self {
        Self {
            id: manga.id,
            name: manga.name,
            volumes: manga.volumes,
            format_id: manga.format_id,
            publisher_id: manga.publisher_id,
        }
    }
}

/// A manga joined with its format and publisher names, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MangaWithLookups {
    pub id: DbId,
    pub name: String,
    pub volumes: Option<i32>,
    pub format_id: DbId,
    pub format_name: String,
    pub publisher_id: DbId,
    pub publisher_name: String,
}

/// DTO for creating a manga. Missing format/publisher default to "Unknown".
#[derive(Debug, Clone, Deserialize)]
pub struct CreateManga {
    pub name: String,
    pub volumes: Option<i32>,
    pub format_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
}

/// DTO for updating a manga. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateManga {
    pub name: Option<String>,
    pub volumes: Option<i32>,
    pub format_id: Option<DbId>,
    pub publisher_id: Option<DbId>,
}
