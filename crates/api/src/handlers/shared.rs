//! Handler for comparing two profiles' collections.

use axum::extract::{Path, State};
use axum::Json;
use tankobon_core::shared::{shared_manga, SharedMangaView};
use tankobon_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::handlers::profile::ensure_active_profile;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profiles/{id}/shared/{other_id}
///
/// Manga owned by both profiles, each with both holdings side by side.
pub async fn list_shared(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Vec<SharedMangaView>>>> {
    ensure_active_profile(&state.pool, id).await?;
    ensure_active_profile(&state.pool, other_id).await?;

    let shared = shared_manga(&state.store(), id, other_id)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to load shared manga: {e}")))?;
    Ok(Json(DataResponse::new(shared)))
}
