//! Entry entity model and DTOs.
//!
//! An entry records how many volumes of one manga a profile owns. The
//! quantity is never checked against the manga's volume count.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tankobon_core::collection::{EntryRecord, OwnedEntry};
use tankobon_core::shared::is_collection_complete;
use tankobon_core::types::{DbId, Timestamp};

/// A row from the `entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entry {
    pub id: DbId,
    pub manga_id: DbId,
    pub profile_id: DbId,
    pub quantity: i32,
    pub pending: Option<String>,
    pub priority: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            manga_id: entry.manga_id,
            profile_id: entry.profile_id,
            quantity: entry.quantity,
            pending: entry.pending,
            priority: entry.priority,
        }
    }
}

/// An entry joined with its manga's name and volume count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EntryWithManga {
    pub id: DbId,
    pub manga_id: DbId,
    pub manga_name: String,
    pub volumes: Option<i32>,
    pub profile_id: DbId,
    pub quantity: i32,
    pub pending: Option<String>,
    pub priority: bool,
}

impl EntryWithManga {
    /// Whether this single entry owns every volume of the series.
    pub fn is_complete(&self) -> bool {
        is_collection_complete(self.volumes, i64::from(self.quantity))
    }
}

impl From<EntryWithManga> for OwnedEntry {
    fn from(row: EntryWithManga) -> Self {
        Self {
            entry_id: row.id,
            manga_id: row.manga_id,
            manga_name: row.manga_name,
            volumes: row.volumes,
            profile_id: row.profile_id,
            quantity: row.quantity,
            pending: row.pending,
            priority: row.priority,
        }
    }
}

/// DTO for creating an entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntry {
    pub manga_id: DbId,
    pub profile_id: DbId,
    pub quantity: Option<i32>,
    pub pending: Option<String>,
    pub priority: Option<bool>,
}

/// DTO for updating an entry. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntry {
    pub quantity: Option<i32>,
    pub pending: Option<String>,
    pub priority: Option<bool>,
}
