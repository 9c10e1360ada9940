//! Handler for uploading a collection file into a profile.

use std::io;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use futures::{AsyncBufReadExt, TryStreamExt};
use tankobon_core::import::{import_lines, validate_file_name, ImportSummary};
use tankobon_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::handlers::profile::ensure_active_profile;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/profiles/{id}/import
///
/// Expects a multipart form whose first file field is a `.tsv` export. The
/// file is streamed line by line; it is never buffered whole. Rows written
/// before a failure are kept.
pub async fn import_collection(
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ImportSummary>>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        validate_file_name(&file_name)?;
        ensure_active_profile(&state.pool, profile_id).await?;

        tracing::info!(profile_id, file_name = %file_name, "Collection import started");

        let lines = Box::pin(field.map_err(io::Error::other))
            .into_async_read()
            .lines();
        let store = state.store();
        let summary = import_lines(&store, lines, profile_id, &state.shutdown).await?;

        return Ok((StatusCode::CREATED, Json(DataResponse::new(summary))));
    }

    Err(AppError::BadRequest(
        "No file received in multipart upload".to_string(),
    ))
}
