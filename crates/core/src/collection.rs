//! Collection records exchanged across the [`CollectionStore`] seam, plus the
//! validation rules shared by the HTTP layer.
//!
//! These are projections, not full rows: they carry exactly what the import
//! pipeline and the shared-collection aggregator read or write.
//!
//! [`CollectionStore`]: crate::store::CollectionStore

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Id of the seeded "Unknown" row in both `formats` and `publishers`.
pub const UNKNOWN_LOOKUP_ID: DbId = 1;

/// Name of the seeded fallback format/publisher.
pub const UNKNOWN_LOOKUP_NAME: &str = "Unknown";

/// Maximum length of any user-supplied name (manga, profile, format, publisher).
pub const MAX_NAME_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Lookup kind
// ---------------------------------------------------------------------------

/// The two lazily-populated lookup tables referenced by manga.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    Format,
    Publisher,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Publisher => "publisher",
        }
    }

    /// Entity name used in [`CoreError::NotFound`] messages.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Format => "Format",
            Self::Publisher => "Publisher",
        }
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Profile status
// ---------------------------------------------------------------------------

/// Soft-delete state of a profile. Deleting a profile moves it to
/// `Inactive`; rows are never physically removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Active,
    Inactive,
}

impl ProfileStatus {
    /// Map the stored `is_active` column to a status.
    pub fn from_is_active(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl From<bool> for ProfileStatus {
    fn from(is_active: bool) -> Self {
        Self::from_is_active(is_active)
    }
}

impl std::fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A manga as seen by the import pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MangaRecord {
    pub id: DbId,
    pub name: String,
    pub volumes: Option<i32>,
    pub format_id: DbId,
    pub publisher_id: DbId,
}

/// Input for creating a manga during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewManga {
    pub name: String,
    pub volumes: Option<i32>,
    pub format_id: DbId,
    pub publisher_id: DbId,
}

/// Input for creating an entry during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub manga_id: DbId,
    pub profile_id: DbId,
    pub quantity: i32,
    pub pending: Option<String>,
    pub priority: bool,
}

/// An entry row returned after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub id: DbId,
    pub manga_id: DbId,
    pub profile_id: DbId,
    pub quantity: i32,
    pub pending: Option<String>,
    pub priority: bool,
}

/// An entry joined with the manga it points at. Input to the
/// shared-collection aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedEntry {
    pub entry_id: DbId,
    pub manga_id: DbId,
    pub manga_name: String,
    pub volumes: Option<i32>,
    pub profile_id: DbId,
    pub quantity: i32,
    pub pending: Option<String>,
    pub priority: bool,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a user-supplied name: non-blank and at most [`MAX_NAME_LENGTH`]
/// characters.
pub fn validate_name(field: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Owned quantities are never negative. They are not checked against the
/// manga's total volume count.
pub fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity < 0 {
        return Err(CoreError::Validation(format!(
            "quantity must be >= 0, got {quantity}"
        )));
    }
    Ok(())
}

/// A known volume count must be positive.
pub fn validate_volumes(volumes: Option<i32>) -> Result<(), CoreError> {
    match volumes {
        Some(v) if v <= 0 => Err(CoreError::Validation(format!(
            "volumes must be > 0 when set, got {v}"
        ))),
        _ => Ok(()),
    }
}
