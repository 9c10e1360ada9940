//! Format lookup model and DTOs.
//!
//! Formats (tankobon, omnibus, kanzenban, ...) are created on demand by
//! imports. Row 1 is the seeded "Unknown" fallback.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tankobon_core::types::{DbId, Timestamp};

/// A row from the `formats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Format {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a format.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFormat {
    pub name: String,
}

/// DTO for renaming a format.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFormat {
    pub name: Option<String>,
}
