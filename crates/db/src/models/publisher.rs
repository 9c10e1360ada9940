//! Publisher lookup model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tankobon_core::types::{DbId, Timestamp};

/// A row from the `publishers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Publisher {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePublisher {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePublisher {
    pub name: Option<String>,
}
