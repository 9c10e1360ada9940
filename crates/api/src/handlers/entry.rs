//! Handlers for the `/entries` resource.
//!
//! Quantities must be non-negative but may exceed the manga's volume count.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tankobon_core::collection::validate_quantity;
use tankobon_core::error::CoreError;
use tankobon_core::types::DbId;
use tankobon_db::models::entry::{CreateEntry, Entry, UpdateEntry};
use tankobon_db::repositories::{EntryRepo, MangaRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::profile::ensure_active_profile;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Entry",
        id,
    })
}

/// POST /api/v1/entries
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEntry>,
) -> AppResult<(StatusCode, Json<DataResponse<Entry>>)> {
    if let Some(quantity) = input.quantity {
        validate_quantity(quantity)?;
    }
    ensure_active_profile(&state.pool, input.profile_id).await?;
    MangaRepo::find_by_id(&state.pool, input.manga_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Manga",
            id: input.manga_id,
        }))?;

    let entry = EntryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(entry))))
}

/// GET /api/v1/entries
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Entry>>>> {
    let entries = EntryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(entries)))
}

/// GET /api/v1/entries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Entry>>> {
    let entry = EntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(entry)))
}

/// PUT /api/v1/entries/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEntry>,
) -> AppResult<Json<DataResponse<Entry>>> {
    if let Some(quantity) = input.quantity {
        validate_quantity(quantity)?;
    }
    let entry = EntryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(entry)))
}

/// DELETE /api/v1/entries/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if EntryRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
