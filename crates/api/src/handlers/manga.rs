//! Handlers for the `/manga` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tankobon_core::collection::{validate_name, validate_volumes, LookupKind};
use tankobon_core::error::CoreError;
use tankobon_core::types::DbId;
use tankobon_db::models::manga::{CreateManga, Manga, MangaWithLookups, UpdateManga};
use tankobon_db::repositories::{FormatRepo, MangaRepo, PublisherRepo};
use tankobon_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Manga",
        id,
    })
}

/// Fail with 404 when a referenced format or publisher does not exist.
async fn ensure_lookup_exists(pool: &DbPool, kind: LookupKind, id: Option<DbId>) -> AppResult<()> {
    let Some(id) = id else {
        return Ok(());
    };
    let exists = match kind {
        LookupKind::Format => FormatRepo::find_by_id(pool, id).await?.is_some(),
        LookupKind::Publisher => PublisherRepo::find_by_id(pool, id).await?.is_some(),
    };
    if exists {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }))
    }
}

/// POST /api/v1/manga
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateManga>,
) -> AppResult<(StatusCode, Json<DataResponse<Manga>>)> {
    validate_name("name", &input.name)?;
    validate_volumes(input.volumes)?;
    ensure_lookup_exists(&state.pool, LookupKind::Format, input.format_id).await?;
    ensure_lookup_exists(&state.pool, LookupKind::Publisher, input.publisher_id).await?;

    let manga = MangaRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(manga))))
}

/// GET /api/v1/manga
///
/// Lists manga with their format and publisher names.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MangaWithLookups>>>> {
    let manga = MangaRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(manga)))
}

/// GET /api/v1/manga/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Manga>>> {
    let manga = MangaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(manga)))
}

/// PUT /api/v1/manga/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateManga>,
) -> AppResult<Json<DataResponse<Manga>>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    validate_volumes(input.volumes)?;
    ensure_lookup_exists(&state.pool, LookupKind::Format, input.format_id).await?;
    ensure_lookup_exists(&state.pool, LookupKind::Publisher, input.publisher_id).await?;

    let manga = MangaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(manga)))
}

/// DELETE /api/v1/manga/{id}
///
/// Also removes every entry for the manga.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if MangaRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
