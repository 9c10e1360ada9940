//! Profile entity model and DTOs.
//!
//! Profiles are never physically deleted. The `is_active` column is read
//! into [`ProfileStatus`] and inactive profiles are hidden from reads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tankobon_core::collection::ProfileStatus;
use tankobon_core::types::{DbId, Timestamp};

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub name: String,
    /// Path of the profile picture, served by the surrounding application.
    pub profile_picture: Option<String>,
    #[sqlx(rename = "is_active", try_from = "bool")]
    pub status: ProfileStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub name: String,
    pub profile_picture: Option<String>,
}

/// DTO for updating a profile. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub profile_picture: Option<String>,
}
